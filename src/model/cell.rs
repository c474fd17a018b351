//! Periodic simulation cells.
//!
//! A [`Cell`] stores the three lattice vectors as the rows of a 3×3 matrix,
//! so a fractional coordinate `f` maps to the Cartesian point
//! `f[0]·a + f[1]·b + f[2]·c`.

use nalgebra::{Matrix3, Vector3};
use rand::Rng;

/// Volumes at or below this value are treated as degenerate.
const DEGENERATE_VOLUME: f64 = 1e-12;

/// Lattice vectors of a periodic cell, one per row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    rows: Matrix3<f64>,
}

impl Cell {
    /// Creates a cell from its three lattice vectors `[a, b, c]`.
    pub fn new(vectors: [[f64; 3]; 3]) -> Self {
        let [a, b, c] = vectors;
        Self {
            rows: Matrix3::new(
                a[0], a[1], a[2], //
                b[0], b[1], b[2], //
                c[0], c[1], c[2],
            ),
        }
    }

    pub fn from_matrix(rows: Matrix3<f64>) -> Self {
        Self { rows }
    }

    /// The row-vector matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.rows
    }

    /// Lattice vector `i` (0 = a, 1 = b, 2 = c).
    #[inline]
    pub fn vector(&self, i: usize) -> Vector3<f64> {
        self.rows.row(i).transpose()
    }

    pub fn vectors(&self) -> [[f64; 3]; 3] {
        [0, 1, 2].map(|i| self.vector(i).into())
    }

    /// Absolute value of the determinant.
    pub fn volume(&self) -> f64 {
        self.rows.determinant().abs()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let volume = self.volume();
        volume.is_nan() || volume <= DEGENERATE_VOLUME
    }

    /// Lengths of a, b and c.
    pub fn lengths(&self) -> [f64; 3] {
        [0, 1, 2].map(|i| self.vector(i).norm())
    }

    /// Angles in degrees: alpha between b and c, beta between a and c,
    /// gamma between a and b.
    pub fn angles(&self) -> [f64; 3] {
        let angle = |i: usize, j: usize| self.vector(i).angle(&self.vector(j)).to_degrees();
        [angle(1, 2), angle(0, 2), angle(0, 1)]
    }

    /// Multiplies row `i` by `factors[i]`.
    pub fn scaled(&self, factors: [usize; 3]) -> Self {
        let mut rows = self.rows;
        for (i, &f) in factors.iter().enumerate() {
            let mut row = rows.row_mut(i);
            row *= f as f64;
        }
        Self { rows }
    }

    /// Divides row `i` by `factors[i]`.
    pub fn divided(&self, factors: [usize; 3]) -> Self {
        let mut rows = self.rows;
        for (i, &f) in factors.iter().enumerate() {
            let mut row = rows.row_mut(i);
            row /= f as f64;
        }
        Self { rows }
    }

    /// Uniform scaling of every lattice vector.
    pub fn scaled_uniform(&self, factor: f64) -> Self {
        Self {
            rows: self.rows * factor,
        }
    }

    /// Converts fractional coordinates to Cartesian.
    #[inline]
    pub fn to_cartesian(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        self.rows.tr_mul(fractional)
    }

    /// Converts Cartesian coordinates to fractional, or `None` for a
    /// degenerate cell.
    pub fn to_fractional(&self, position: &Vector3<f64>) -> Option<Vector3<f64>> {
        self.rows
            .transpose()
            .try_inverse()
            .map(|inverse| inverse * position)
    }

    /// Number of neighbouring cells to scan along each axis so that, once a
    /// difference vector is reduced into the central cell, every periodic
    /// image closer than `cutoff` is reached. At least one shell is always
    /// scanned. Returns `None` for a degenerate cell.
    ///
    /// Shell `k` spans `cutoff` divided by the spacing of the lattice planes
    /// normal to the `k`-th reciprocal vector, plus half a cell.
    pub fn image_shells(&self, cutoff: f64) -> Option<[usize; 3]> {
        let inverse = self.rows.transpose().try_inverse()?;
        let cutoff = cutoff.max(0.0);
        Some([0, 1, 2].map(|k| {
            let shells = (cutoff * inverse.row(k).norm() + 0.5).ceil();
            if shells.is_finite() { (shells as usize).max(1) } else { usize::MAX }
        }))
    }

    /// Draws a point inside the parallelepiped spanned by the lattice
    /// vectors, uniform in fractional coordinates.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        let mut point = Vector3::zeros();
        for i in 0..3 {
            point += self.vector(i) * rng.random::<f64>();
        }
        point
    }
}
