use super::atom::Atom;
use super::cell::Cell;
use super::fragment::Fragment;
use super::types::Element;
use nalgebra::Vector3;
use std::collections::BTreeMap;

/// A periodic atomic configuration.
///
/// Every atom carries an origin group id alongside it. Atoms placed together
/// as one rigid block share a group; groups are numbered from zero in
/// placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub cell: Cell,
    pub pbc: [bool; 3],
    atoms: Vec<Atom>,
    groups: Vec<usize>,
}

impl Structure {
    /// An empty structure, periodic along all three axes.
    pub fn new(cell: Cell) -> Self {
        Self {
            cell,
            pbc: [true; 3],
            atoms: Vec::new(),
            groups: Vec::new(),
        }
    }

    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[inline]
    pub fn groups(&self) -> &[usize] {
        &self.groups
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn push(&mut self, atom: Atom, group: usize) {
        self.atoms.push(atom);
        self.groups.push(group);
    }

    /// Appends all atoms of `fragment` under one group id.
    pub fn extend_fragment(&mut self, fragment: &Fragment, group: usize) {
        for atom in fragment.atoms() {
            self.push(*atom, group);
        }
    }

    /// Number of distinct group ids (highest id plus one).
    pub fn group_count(&self) -> usize {
        self.groups.iter().max().map_or(0, |g| g + 1)
    }

    /// Atom indices for each group id, in atom order.
    pub fn group_members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.group_count()];
        for (idx, &g) in self.groups.iter().enumerate() {
            members[g].push(idx);
        }
        members
    }

    /// Atom count per element.
    pub fn composition(&self) -> BTreeMap<Element, usize> {
        let mut counts = BTreeMap::new();
        for atom in &self.atoms {
            *counts.entry(atom.element).or_insert(0) += 1;
        }
        counts
    }

    /// Maps every position back into the cell along periodic axes.
    pub fn wrap(&mut self) {
        let Some(inverse) = self.cell.matrix().transpose().try_inverse() else {
            return;
        };
        for atom in &mut self.atoms {
            let mut frac = inverse * Vector3::from(atom.position);
            for k in 0..3 {
                if self.pbc[k] {
                    frac[k] -= frac[k].floor();
                }
            }
            atom.position = self.cell.to_cartesian(&frac).into();
        }
    }

    /// Tiles the structure `repeat[i]` times along lattice vector `i`.
    ///
    /// Images are emitted with the first axis outermost. Group ids of image
    /// `n` are offset by `n * group_stride`; a stride of zero keeps them.
    pub fn repeat(&self, repeat: [usize; 3], group_stride: usize) -> Structure {
        let mut out = Structure {
            cell: self.cell.scaled(repeat),
            pbc: self.pbc,
            atoms: Vec::with_capacity(self.len() * repeat.iter().product::<usize>()),
            groups: Vec::with_capacity(self.len() * repeat.iter().product::<usize>()),
        };
        let mut image = 0;
        for m0 in 0..repeat[0] {
            for m1 in 0..repeat[1] {
                for m2 in 0..repeat[2] {
                    let shift = self
                        .cell
                        .to_cartesian(&Vector3::new(m0 as f64, m1 as f64, m2 as f64));
                    let offset: [f64; 3] = shift.into();
                    for (atom, &group) in self.atoms.iter().zip(&self.groups) {
                        out.push(atom.translated(offset), group + image * group_stride);
                    }
                    image += 1;
                }
            }
        }
        out
    }
}

/// Shortest-distance search over periodic images of a cell.
///
/// Differences are first reduced into the central cell in fractional
/// coordinates, then enough neighbouring translations are scanned to reach
/// every image closer than the cutoff given at construction. Distances
/// beyond the cutoff may be overestimated.
#[derive(Debug, Clone)]
pub struct PeriodicImages {
    cell: Cell,
    inverse: nalgebra::Matrix3<f64>,
    pbc: [bool; 3],
    /// Lattice translations as (integer fractional index, Cartesian vector).
    translations: Vec<(Vector3<f64>, Vector3<f64>)>,
}

impl PeriodicImages {
    /// Returns `None` when the cell is degenerate.
    pub fn new(cell: &Cell, pbc: [bool; 3], cutoff: f64) -> Option<Self> {
        let inverse = cell.matrix().transpose().try_inverse()?;
        let shells = cell.image_shells(cutoff)?;
        let range = |k: usize| {
            let n = if pbc[k] { shells[k] as i64 } else { 0 };
            -n..=n
        };
        let mut translations = Vec::new();
        for i in range(0) {
            for j in range(1) {
                for k in range(2) {
                    let index = Vector3::new(i as f64, j as f64, k as f64);
                    translations.push((index, cell.to_cartesian(&index)));
                }
            }
        }
        Some(Self {
            cell: *cell,
            inverse,
            pbc,
            translations,
        })
    }

    pub fn for_structure(structure: &Structure, cutoff: f64) -> Option<Self> {
        Self::new(&structure.cell, structure.pbc, cutoff)
    }

    /// Number of translations scanned per distance.
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// Minimum distance from `a` to any periodic image of `b`.
    ///
    /// With `skip_direct`, `a` and `b` are taken as parts of one rigid group
    /// and the untranslated pair is excluded, leaving only true images.
    pub fn min_distance(&self, a: [f64; 3], b: [f64; 3], skip_direct: bool) -> f64 {
        let mut frac = self.inverse * (Vector3::from(b) - Vector3::from(a));
        let mut shift = Vector3::zeros();
        for k in 0..3 {
            if self.pbc[k] {
                shift[k] = frac[k].round();
                frac[k] -= shift[k];
            }
        }
        let delta = self.cell.to_cartesian(&frac);
        // the untranslated pair sits at translation `shift` after reduction
        self.translations
            .iter()
            .filter(|(index, _)| !(skip_direct && *index == shift))
            .map(|(_, t)| (delta + t).norm())
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn cubic(a: f64) -> Cell {
        Cell::new([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
    }

    #[test]
    fn new_structure_is_periodic_and_empty() {
        let s = Structure::new(cubic(3.0));
        assert!(s.is_empty());
        assert_eq!(s.pbc, [true; 3]);
        assert_eq!(s.group_count(), 0);
    }

    #[test]
    fn extend_fragment_shares_group() {
        let mut s = Structure::new(cubic(5.0));
        let frag = Fragment::new(vec![
            Atom::new(Element::C, [0.0, 0.0, 0.0]),
            Atom::new(Element::O, [0.0, 0.0, 1.2]),
        ]);
        s.extend_fragment(&frag, 0);
        s.push(Atom::new(Element::Ar, [2.0, 2.0, 2.0]), 1);
        assert_eq!(s.groups(), &[0, 0, 1]);
        assert_eq!(s.group_members(), vec![vec![0, 1], vec![2]]);
        assert_eq!(s.composition()[&Element::C], 1);
        assert_eq!(s.composition()[&Element::Ar], 1);
    }

    #[test]
    fn wrap_maps_positions_into_cell() {
        let mut s = Structure::new(cubic(2.0));
        s.push(Atom::new(Element::H, [2.5, -0.5, 4.25]), 0);
        s.wrap();
        let p = s.atoms()[0].position;
        assert!(approx_eq(p[0], 0.5, 1e-12));
        assert!(approx_eq(p[1], 1.5, 1e-12));
        assert!(approx_eq(p[2], 0.25, 1e-12));
    }

    #[test]
    fn wrap_leaves_non_periodic_axes_alone() {
        let mut s = Structure::new(cubic(2.0));
        s.pbc = [true, true, false];
        s.push(Atom::new(Element::H, [2.5, 0.5, 4.25]), 0);
        s.wrap();
        let p = s.atoms()[0].position;
        assert!(approx_eq(p[0], 0.5, 1e-12));
        assert!(approx_eq(p[2], 4.25, 1e-12));
    }

    #[test]
    fn repeat_orders_images_and_offsets_groups() {
        let mut s = Structure::new(cubic(2.0));
        s.push(Atom::new(Element::Na, [0.5, 0.5, 0.5]), 0);
        s.push(Atom::new(Element::Cl, [1.5, 1.5, 1.5]), 1);

        let big = s.repeat([2, 1, 2], 2);
        assert_eq!(big.len(), 8);
        assert!(approx_eq(big.cell.volume(), 32.0, 1e-9));
        assert_eq!(big.groups(), &[0, 1, 2, 3, 4, 5, 6, 7]);

        // image 1 is (0, 0, 1), image 2 is (1, 0, 0)
        assert_eq!(big.atoms()[2].position, [0.5, 0.5, 2.5]);
        assert_eq!(big.atoms()[4].position, [2.5, 0.5, 0.5]);
    }

    #[test]
    fn repeat_with_zero_stride_keeps_groups() {
        let mut s = Structure::new(cubic(2.0));
        s.push(Atom::new(Element::Na, [0.0; 3]), 0);
        let big = s.repeat([3, 1, 1], 0);
        assert_eq!(big.groups(), &[0, 0, 0]);
    }

    #[test]
    fn min_distance_uses_nearest_image() {
        let images = PeriodicImages::new(&cubic(4.0), [true; 3], 1.0).unwrap();
        let d = images.min_distance([0.2, 0.0, 0.0], [3.8, 0.0, 0.0], false);
        assert!(approx_eq(d, 0.4, 1e-12));
    }

    #[test]
    fn min_distance_respects_non_periodic_axis() {
        let images = PeriodicImages::new(&cubic(4.0), [false, true, true], 1.0).unwrap();
        let d = images.min_distance([0.2, 0.0, 0.0], [3.8, 0.0, 0.0], false);
        assert!(approx_eq(d, 3.6, 1e-12));
    }

    #[test]
    fn skip_direct_measures_only_images() {
        let images = PeriodicImages::new(&cubic(3.0), [true; 3], 1.0).unwrap();
        let self_image = images.min_distance([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], true);
        assert!(approx_eq(self_image, 3.0, 1e-12));

        let bonded = images.min_distance([0.0, 0.0, 0.0], [0.0, 0.0, 1.1], true);
        assert!(approx_eq(bonded, 1.9, 1e-12));
    }

    #[test]
    fn degenerate_cell_has_no_images() {
        let flat = Cell::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
        assert!(PeriodicImages::new(&flat, [true; 3], 1.0).is_none());
    }

    #[test]
    fn short_lattice_vector_beyond_first_shell_is_found() {
        // 2b - a = (0, 0.4, 0) although every row is long
        let skewed = Cell::new([[10.0, 0.0, 0.0], [5.0, 0.2, 0.0], [0.0, 0.0, 10.0]]);
        let images = PeriodicImages::new(&skewed, [true; 3], 1.0).unwrap();
        let p = [3.0, 0.1, 5.0];
        assert!(approx_eq(images.min_distance(p, p, true), 0.4, 1e-9));

        let q = [3.0, 0.1, 5.9];
        assert!(approx_eq(images.min_distance(p, q, false), 0.9, 1e-9));
        assert!(approx_eq(images.min_distance(p, q, true), (0.4f64.powi(2) + 0.81).sqrt(), 1e-9));
    }

    #[test]
    fn skip_direct_handles_pairs_spanning_the_cell() {
        let images = PeriodicImages::new(&cubic(3.0), [true; 3], 1.0).unwrap();
        // raw separation 2.5 reduces to -0.5; the direct pair must still be skipped
        let d = images.min_distance([0.2, 1.0, 1.0], [2.7, 1.0, 1.0], true);
        assert!(approx_eq(d, 0.5, 1e-12));
        let d = images.min_distance([0.2, 1.0, 1.0], [2.7, 1.0, 1.0], false);
        assert!(approx_eq(d, 0.5, 1e-12));
    }

    #[test]
    fn scan_widens_with_cutoff() {
        assert_eq!(PeriodicImages::new(&cubic(4.0), [true; 3], 1.0).unwrap().len(), 27);
        assert_eq!(PeriodicImages::new(&cubic(4.0), [true; 3], 10.0).unwrap().len(), 343);
        assert_eq!(
            PeriodicImages::new(&cubic(4.0), [false, true, true], 10.0).unwrap().len(),
            49
        );
    }
}
