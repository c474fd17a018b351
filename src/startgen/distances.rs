//! Minimum interatomic distance tables.

use super::error::ConfigError;
use crate::model::structure::{PeriodicImages, Structure};
use crate::model::types::Element;
use std::collections::BTreeMap;

/// Minimum allowed center-to-center distance per unordered element pair.
///
/// Keys are stored with the lower atomic number first, so `(a, b)` and
/// `(b, a)` always resolve to the same entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceTable {
    entries: BTreeMap<(Element, Element), f64>,
}

#[inline]
fn key(a: Element, b: Element) -> (Element, Element) {
    if a <= b { (a, b) } else { (b, a) }
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum distance for the pair, replacing any previous value.
    pub fn insert(&mut self, a: Element, b: Element, distance: f64) {
        self.entries.insert(key(a, b), distance);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, a: Element, b: Element, distance: f64) -> Self {
        self.insert(a, b, distance);
        self
    }

    #[inline]
    pub fn get(&self, a: Element, b: Element) -> Option<f64> {
        self.entries.get(&key(a, b)).copied()
    }

    /// Minimum distance for the pair; pairs absent from the table are
    /// unconstrained.
    #[inline]
    pub fn min_distance(&self, a: Element, b: Element) -> f64 {
        self.get(a, b).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, Element, f64)> + '_ {
        self.entries.iter().map(|(&(a, b), &d)| (a, b, d))
    }

    /// Derives a table from covalent radii: `(X, X)` gets `2·r_X·ratio` and
    /// `(X, Y)` gets `(r_X + r_Y)·ratio`.
    pub fn from_covalent_radii(elements: &[Element], ratio: f64) -> Self {
        let mut table = Self::new();
        for (i, &a) in elements.iter().enumerate() {
            for &b in &elements[i..] {
                table.insert(a, b, ratio * (a.covalent_radius() + b.covalent_radius()));
            }
        }
        table
    }

    /// Largest same-element minimum distance, or zero for an empty table.
    pub fn max_self_distance(&self) -> f64 {
        self.iter()
            .filter(|(a, b, _)| a == b)
            .map(|(_, _, d)| d)
            .fold(0.0, f64::max)
    }

    /// Largest entry of any pair, or zero for an empty table. Image searches
    /// use it as their cutoff.
    pub fn max_distance(&self) -> f64 {
        self.entries.values().copied().fold(0.0, f64::max)
    }

    /// Checks that every pair drawn from `elements`, self-pairs included,
    /// has a finite non-negative entry.
    pub fn validate(&self, elements: &[Element]) -> Result<(), ConfigError> {
        for (i, &a) in elements.iter().enumerate() {
            for &b in &elements[i..] {
                let distance = self
                    .get(a, b)
                    .ok_or_else(|| ConfigError::missing_distance(a, b))?;
                if !distance.is_finite() || distance < 0.0 {
                    let (a, b) = key(a, b);
                    return Err(ConfigError::InvalidDistance { a, b, distance });
                }
            }
        }
        Ok(())
    }
}

/// How minimum distances are specified when building a generator.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceSpec {
    /// Explicit per-pair table.
    Table(DistanceTable),
    /// Fraction of the summed covalent radii.
    CovalentRatio(f64),
}

impl DistanceSpec {
    /// Produces the table covering `elements`.
    pub(crate) fn resolve(&self, elements: &[Element]) -> Result<DistanceTable, ConfigError> {
        let table = match self {
            DistanceSpec::Table(table) => table.clone(),
            DistanceSpec::CovalentRatio(ratio) => {
                if !ratio.is_finite() || *ratio < 0.0 {
                    return Err(ConfigError::InvalidRatio(*ratio));
                }
                DistanceTable::from_covalent_radii(elements, *ratio)
            }
        };
        table.validate(elements)?;
        Ok(table)
    }
}

impl From<DistanceTable> for DistanceSpec {
    fn from(table: DistanceTable) -> Self {
        DistanceSpec::Table(table)
    }
}

impl From<f64> for DistanceSpec {
    fn from(ratio: f64) -> Self {
        DistanceSpec::CovalentRatio(ratio)
    }
}

/// Reports whether any two atoms, counting periodic images, sit closer than
/// the table allows.
///
/// Atoms sharing a group id are not compared directly, only through
/// periodic images, so a rigid block never conflicts with itself in place.
pub fn atoms_too_close(structure: &Structure, blmin: &DistanceTable) -> bool {
    let Some(images) = PeriodicImages::for_structure(structure, blmin.max_distance()) else {
        return true;
    };
    let atoms = structure.atoms();
    let groups = structure.groups();
    for i in 0..atoms.len() {
        for j in i..atoms.len() {
            let same_group = groups[i] == groups[j];
            let d = images.min_distance(atoms[i].position, atoms[j].position, same_group);
            if d < blmin.min_distance(atoms[i].element, atoms[j].element) {
                return true;
            }
        }
    }
    false
}
