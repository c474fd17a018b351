//! Constrained random placement of blocks inside one subcell.

use super::distances::DistanceTable;
use super::error::GenerationError;
use crate::model::cell::Cell;
use crate::model::fragment::Fragment;
use crate::model::structure::{PeriodicImages, Structure};
use log::trace;
use rand::Rng;

/// One copy of a configured block awaiting placement.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Instance<'a> {
    /// Index of the configured block this copy came from.
    pub block: usize,
    pub fragment: &'a Fragment,
}

/// Places every instance, in order, into an initially empty subcell.
///
/// Instance `n` is stored under group id `n`. Each instance is retried at
/// fresh random positions (and orientations, for multi-atom blocks) until
/// it clears every minimum distance or `max_attempts` is reached.
pub(crate) fn fill_subcell<R: Rng + ?Sized>(
    rng: &mut R,
    subcell: &Cell,
    instances: &[Instance<'_>],
    blmin: &DistanceTable,
    max_attempts: u32,
) -> Result<Structure, GenerationError> {
    let mut structure = Structure::new(*subcell);
    let images = PeriodicImages::for_structure(&structure, blmin.max_distance())
        .ok_or(GenerationError::DegenerateCell)?;

    for (group, instance) in instances.iter().enumerate() {
        let placed = (1..=max_attempts).find_map(|attempt| {
            let candidate = random_placement(rng, subcell, instance.fragment);
            if fits(&structure, &images, &candidate, blmin) {
                trace!("instance {group} (block {}) placed on attempt {attempt}", instance.block);
                Some(candidate)
            } else {
                None
            }
        });
        let Some(fragment) = placed else {
            return Err(GenerationError::Placement {
                instance: group,
                block: instance.block,
                attempts: max_attempts,
            });
        };
        structure.extend_fragment(&fragment, group);
    }
    Ok(structure)
}

/// A copy of `template` centered on a random point of the cell; blocks with
/// more than one atom are also given a random orientation about that point.
///
/// Euler angles are z-x-z; the middle one spans half a turn.
fn random_placement<R: Rng + ?Sized>(rng: &mut R, cell: &Cell, template: &Fragment) -> Fragment {
    let point: [f64; 3] = cell.random_point(rng).into();
    let center = template.center_of_positions();
    let mut fragment = template.clone();
    fragment.translate([
        point[0] - center[0],
        point[1] - center[1],
        point[2] - center[2],
    ]);
    if fragment.len() > 1 {
        let phi = 360.0 * rng.random::<f64>();
        let theta = 360.0 * rng.random::<f64>();
        let psi = 360.0 * rng.random::<f64>();
        fragment.euler_rotate(phi, 0.5 * theta, psi, point);
    }
    fragment
}

/// Checks the candidate against every placed atom and against its own
/// periodic images.
fn fits(
    structure: &Structure,
    images: &PeriodicImages,
    candidate: &Fragment,
    blmin: &DistanceTable,
) -> bool {
    let new = candidate.atoms();
    for (i, a) in new.iter().enumerate() {
        for b in structure.atoms() {
            let d = images.min_distance(a.position, b.position, false);
            if d < blmin.min_distance(a.element, b.element) {
                return false;
            }
        }
        for b in &new[i..] {
            let d = images.min_distance(a.position, b.position, true);
            if d < blmin.min_distance(a.element, b.element) {
                return false;
            }
        }
    }
    true
}
