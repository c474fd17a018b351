//! Expansion of a filled subcell into the full candidate.

use crate::model::cell::Cell;
use crate::model::structure::Structure;
use rand::Rng;
use rand::seq::index;

pub(crate) struct Assembly<'a> {
    pub full_cell: Cell,
    pub repeat: [usize; 3],
    /// Configured block index of each placed instance, by group id.
    pub instance_blocks: &'a [usize],
    /// Replicated instances to drop, per configured block.
    pub surplus: &'a [usize],
}

/// Tiles the filled subcell over the full cell, drops `surplus[b]` randomly
/// chosen copies of each block `b` and renumbers the survivors.
///
/// Survivors are emitted block by block in configuration order, and within
/// a block in increasing replicated group order. Atoms of one copy stay
/// together and keep their intra-block order.
pub(crate) fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    subcell: &Structure,
    assembly: &Assembly<'_>,
) -> Structure {
    let per_image = assembly.instance_blocks.len();
    let replicated = subcell.repeat(assembly.repeat, per_image);
    let members = replicated.group_members();
    let total_groups = per_image * assembly.repeat.iter().product::<usize>();

    let mut candidate = Structure::new(assembly.full_cell);
    let mut next_group = 0;
    for (block, &surplus) in assembly.surplus.iter().enumerate() {
        let groups: Vec<usize> = (0..total_groups)
            .filter(|g| assembly.instance_blocks[g % per_image] == block)
            .collect();

        let mut discard = vec![false; groups.len()];
        for k in index::sample(rng, groups.len(), surplus) {
            discard[k] = true;
        }

        for (&group, _) in groups.iter().zip(&discard).filter(|(_, dropped)| !**dropped) {
            for &idx in members.get(group).map(Vec::as_slice).unwrap_or_default() {
                candidate.push(replicated.atoms()[idx], next_group);
            }
            next_group += 1;
        }
    }
    candidate
}
