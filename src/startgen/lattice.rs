//! Random cell sampling.

use super::bounds::CellValidator;
use super::error::GenerationError;
use crate::model::cell::Cell;
use crate::model::structure::PeriodicImages;
use log::{debug, trace};
use nalgebra::Matrix3;
use rand::Rng;

/// Subcells needing more image shells than this along any axis are too flat
/// to hold atoms.
const MAX_IMAGE_SHELLS: usize = 4;

/// Constraints applied to every sampled cell.
pub(crate) struct CellConstraints<'a> {
    /// Volume of one subcell.
    pub target_volume: f64,
    /// Lower bound on each subcell vector length.
    pub min_length: f64,
    /// Largest minimum distance of any element pair.
    pub cutoff: f64,
    pub repeat: [usize; 3],
    pub bounds: Option<&'a dyn CellValidator>,
    pub max_attempts: u32,
}

/// Samples a subcell and the full cell it tiles.
///
/// Subcells are lower triangular with tilt components within half of the
/// preceding diagonal entries, rescaled to the target volume. A sample is
/// kept when the full cell passes `bounds`, no subcell vector is shorter
/// than `min_length` and no other lattice vector is either. Subcells too flat
/// for a bounded image search within `cutoff` are discarded as well.
pub(crate) fn sample_cell<R: Rng + ?Sized>(
    rng: &mut R,
    constraints: &CellConstraints<'_>,
) -> Result<(Cell, Cell), GenerationError> {
    let edge = constraints.target_volume.cbrt();
    for attempt in 1..=constraints.max_attempts {
        let Some(subcell) = lower_triangular_cell(rng, edge, constraints.target_volume) else {
            trace!("attempt {attempt}: degenerate cell sample");
            continue;
        };
        let full = subcell.scaled(constraints.repeat);

        if let Some(bounds) = constraints.bounds {
            if !bounds.is_within_bounds(&full) {
                trace!("attempt {attempt}: cell outside bounds");
                continue;
            }
        }
        if subcell
            .lengths()
            .iter()
            .any(|&length| length < constraints.min_length)
        {
            trace!("attempt {attempt}: subcell vector shorter than {}", constraints.min_length);
            continue;
        }
        match subcell.image_shells(constraints.cutoff) {
            Some(shells) if shells.iter().all(|&n| n <= MAX_IMAGE_SHELLS) => {}
            _ => {
                trace!("attempt {attempt}: subcell too flat");
                continue;
            }
        }
        let shortest = PeriodicImages::new(&subcell, [true; 3], constraints.min_length)
            .map_or(0.0, |images| images.min_distance([0.0; 3], [0.0; 3], true));
        if shortest < constraints.min_length {
            trace!("attempt {attempt}: lattice vector of length {shortest} in subcell");
            continue;
        }

        debug!(
            "accepted cell after {attempt} attempt(s): lengths {:?}, angles {:?}",
            full.lengths(),
            full.angles()
        );
        return Ok((subcell, full));
    }
    Err(GenerationError::CellSampling {
        attempts: constraints.max_attempts,
    })
}

fn lower_triangular_cell<R: Rng + ?Sized>(rng: &mut R, edge: f64, target_volume: f64) -> Option<Cell> {
    let ax = rng.random::<f64>() * edge;
    let bx = (rng.random::<f64>() - 0.5) * ax;
    let by = rng.random::<f64>() * edge;
    let cx = (rng.random::<f64>() - 0.5) * ax;
    let cy = (rng.random::<f64>() - 0.5) * by;
    let cz = rng.random::<f64>() * edge;

    let rows = Matrix3::new(
        ax, 0.0, 0.0, //
        bx, by, 0.0, //
        cx, cy, cz,
    );
    let volume = (ax * by * cz).abs();
    if volume == 0.0 || !volume.is_finite() {
        return None;
    }
    let cell = Cell::from_matrix(rows).scaled_uniform((target_volume / volume).cbrt());
    (!cell.is_degenerate()).then_some(cell)
}
