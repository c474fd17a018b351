//! Cell shape constraints.

use crate::model::cell::Cell;
use serde::Deserialize;
use std::fmt;

/// Accepts or rejects a full cell during cell sampling.
pub trait CellValidator: Send + Sync {
    fn is_within_bounds(&self, cell: &Cell) -> bool;
}

impl fmt::Debug for dyn CellValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellValidator")
    }
}

/// Inclusive `[min, max]` ranges on cell lengths (Å) and angles (degrees).
///
/// `alpha` is the angle between b and c, `beta` between a and c, `gamma`
/// between a and b. Angles default to 18°–162°, which rules out nearly flat
/// cells; lengths are effectively unbounded.
///
/// # Examples
///
/// ```
/// use bulk_startgen::{Cell, CellBounds, CellValidator};
///
/// let bounds = CellBounds {
///     a: [2.0, 10.0],
///     ..CellBounds::default()
/// };
/// let cubic = Cell::new([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]);
/// assert!(bounds.is_within_bounds(&cubic));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellBounds {
    pub a: [f64; 2],
    pub b: [f64; 2],
    pub c: [f64; 2],
    pub alpha: [f64; 2],
    pub beta: [f64; 2],
    pub gamma: [f64; 2],
}

impl Default for CellBounds {
    fn default() -> Self {
        let angles = [0.1 * 180.0, 0.9 * 180.0];
        Self {
            a: [0.0, 1e6],
            b: [0.0, 1e6],
            c: [0.0, 1e6],
            alpha: angles,
            beta: angles,
            gamma: angles,
        }
    }
}

impl CellValidator for CellBounds {
    fn is_within_bounds(&self, cell: &Cell) -> bool {
        let [a, b, c] = cell.lengths();
        let [alpha, beta, gamma] = cell.angles();
        let within = |value: f64, [min, max]: [f64; 2]| min <= value && value <= max;
        within(a, self.a)
            && within(b, self.b)
            && within(c, self.c)
            && within(alpha, self.alpha)
            && within(beta, self.beta)
            && within(gamma, self.gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(a: f64) -> Cell {
        Cell::new([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
    }

    #[test]
    fn default_bounds_accept_cubic_cell() {
        assert!(CellBounds::default().is_within_bounds(&cubic(4.0)));
    }

    #[test]
    fn default_bounds_reject_flat_cell() {
        let sheared = Cell::new([[1.0, 0.0, 0.0], [10.0, 0.5, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!CellBounds::default().is_within_bounds(&sheared));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let bounds = CellBounds {
            a: [4.0, 4.0],
            ..CellBounds::default()
        };
        assert!(bounds.is_within_bounds(&cubic(4.0)));
        assert!(!bounds.is_within_bounds(&cubic(4.1)));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let bounds: CellBounds = toml::from_str("c = [3.0, 8.0]").unwrap();
        assert_eq!(bounds.c, [3.0, 8.0]);
        assert_eq!(bounds.alpha, CellBounds::default().alpha);
    }

    #[test]
    fn custom_validator_through_trait_object() {
        struct MaxVolume(f64);
        impl CellValidator for MaxVolume {
            fn is_within_bounds(&self, cell: &Cell) -> bool {
                cell.volume() <= self.0
            }
        }
        let validator: Box<dyn CellValidator> = Box::new(MaxVolume(30.0));
        assert!(validator.is_within_bounds(&cubic(3.0)));
        assert!(!validator.is_within_bounds(&cubic(4.0)));
        assert_eq!(format!("{validator:?}"), "CellValidator");
    }
}
