//! Random starting structures for bulk crystal structure search.
//!
//! A [`StartGenerator`] holds a validated configuration (building blocks and
//! their counts, minimum interatomic distances, target volume and optional
//! cell constraints) and produces independent random candidates on demand.
//!
//! Each candidate is built in four stages:
//!
//! 1. **Split selection**: a [`SplitScheme`] entry decides into how many
//!    identical subcells the cell is divided, and along which axes.
//! 2. **Cell sampling**: a random lower-triangular subcell with the right
//!    volume is drawn until it passes the shape bounds and no lattice vector
//!    is shorter than the largest same-element minimum distance. A fixed
//!    cell skips this stage.
//! 3. **Placement**: enough copies of every block to cover its count after
//!    replication are shuffled and dropped, one by one, at random positions
//!    and orientations in the subcell, rejecting any that come too close to
//!    atoms already placed.
//! 4. **Assembly**: the subcell is replicated over the full cell and surplus
//!    copies are removed at random so the composition is exact.

mod assemble;
mod bounds;
mod config;
mod distances;
mod error;
mod lattice;
mod placement;
mod splits;

pub use bounds::{CellBounds, CellValidator};
pub use config::{
    AttemptLimits, BlockConfig, BlockSpec, DistanceConfig, DistanceEntry, GeneratorConfig,
    Options,
};
pub use distances::{DistanceSpec, DistanceTable, atoms_too_close};
pub use error::{ConfigError, GenerationError};
pub use splits::{Split, SplitConfig, SplitScheme};

use crate::model::cell::Cell;
use crate::model::fragment::Fragment;
use crate::model::structure::Structure;
use crate::model::types::Element;
use assemble::{Assembly, assemble};
use lattice::{CellConstraints, sample_cell};
use log::debug;
use placement::{Instance, fill_subcell};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::iter;

/// Generator of random periodic starting structures.
///
/// The configuration is fixed at construction; [`generate_candidate`]
/// borrows the generator immutably, so one instance can serve any number of
/// requests, each drawing only from the random source it is handed.
///
/// [`generate_candidate`]: StartGenerator::generate_candidate
#[derive(Debug)]
pub struct StartGenerator {
    blocks: Vec<(Fragment, usize)>,
    blmin: DistanceTable,
    blminmax: f64,
    volume: f64,
    cell_bounds: Option<Box<dyn CellValidator>>,
    cell: Option<Cell>,
    splits: SplitScheme,
    limits: AttemptLimits,
}

impl StartGenerator {
    /// Validates and stores a generator configuration.
    ///
    /// `blocks` pairs each building block with the number of copies the
    /// finished structure must contain. `blmin` is either an explicit
    /// [`DistanceTable`] covering every element pair across the blocks, or a
    /// covalent-radius ratio from which such a table is derived.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the volume is not positive, no block is
    /// given, a block name cannot be resolved or resolves to nothing, the
    /// distance table is incomplete or invalid, an attempt limit is zero or
    /// the fixed cell is degenerate.
    pub fn new<I, S>(
        blocks: I,
        blmin: impl Into<DistanceSpec>,
        volume: f64,
        options: Options,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<BlockSpec>,
    {
        if !volume.is_finite() || volume <= 0.0 {
            return Err(ConfigError::InvalidVolume(volume));
        }

        let blocks = blocks
            .into_iter()
            .enumerate()
            .map(|(index, (spec, count))| {
                let fragment = spec.into().resolve()?;
                if fragment.is_empty() {
                    return Err(ConfigError::EmptyBlock { index });
                }
                Ok((fragment, count))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if blocks.is_empty() {
            return Err(ConfigError::NoBlocks);
        }

        let elements: Vec<Element> = blocks
            .iter()
            .flat_map(|(fragment, _)| fragment.elements())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let blmin = blmin.into().resolve(&elements)?;

        if options.limits.max_cell_attempts == 0 || options.limits.max_placement_attempts == 0 {
            return Err(ConfigError::InvalidLimits);
        }
        if let Some(cell) = &options.cell {
            if cell.is_degenerate() {
                return Err(ConfigError::DegenerateCell(cell.volume()));
            }
        }

        let blminmax = blmin.max_self_distance();
        debug!(
            "start generator: {} block type(s), elements {:?}, volume {volume}, min cell length {blminmax}",
            blocks.len(),
            elements
        );

        Ok(Self {
            blocks,
            blmin,
            blminmax,
            volume,
            cell_bounds: options.cell_bounds,
            cell: options.cell,
            splits: options.splits,
            limits: options.limits,
        })
    }

    /// Builds a generator from a parsed [`GeneratorConfig`].
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.block_specs()?,
            config.blmin.to_spec()?,
            config.volume,
            config.options()?,
        )
    }

    /// Resolved blocks with their required counts, in configuration order.
    pub fn blocks(&self) -> &[(Fragment, usize)] {
        &self.blocks
    }

    pub fn blmin(&self) -> &DistanceTable {
        &self.blmin
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Shortest lattice vector length a sampled subcell may have.
    pub fn min_cell_length(&self) -> f64 {
        self.blminmax
    }

    pub fn splits(&self) -> &SplitScheme {
        &self.splits
    }

    pub fn limits(&self) -> AttemptLimits {
        self.limits
    }

    pub fn fixed_cell(&self) -> Option<&Cell> {
        self.cell.as_ref()
    }

    pub fn cell_bounds(&self) -> Option<&dyn CellValidator> {
        self.cell_bounds.as_deref()
    }

    /// Produces one random candidate.
    ///
    /// The returned structure is periodic along all axes and holds exactly
    /// the configured number of copies of every block. Atoms of one copy
    /// share a group id; groups are numbered from zero. Positions are not
    /// wrapped, so multi-atom blocks stay whole.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when no acceptable cell or placement is
    /// found within the configured [`AttemptLimits`].
    pub fn generate_candidate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Structure, GenerationError> {
        let repeat = self.splits.choose(rng);
        let nparts: usize = repeat.iter().product();
        debug!("repeat vector {repeat:?} ({nparts} subcell(s))");

        let (subcell, full_cell) = match self.cell {
            Some(cell) => (cell.divided(repeat), cell),
            None => sample_cell(
                rng,
                &CellConstraints {
                    target_volume: self.volume / nparts as f64,
                    min_length: self.blminmax,
                    cutoff: self.blmin.max_distance(),
                    repeat,
                    bounds: self.cell_bounds.as_deref(),
                    max_attempts: self.limits.max_cell_attempts,
                },
            )?,
        };

        let mut instances = Vec::new();
        let mut surplus = Vec::with_capacity(self.blocks.len());
        for (block, (fragment, count)) in self.blocks.iter().enumerate() {
            let per_subcell = count.div_ceil(nparts);
            surplus.push(nparts * per_subcell - count);
            instances.extend(iter::repeat_n(Instance { block, fragment }, per_subcell));
        }
        instances.shuffle(rng);

        let filled = fill_subcell(
            rng,
            &subcell,
            &instances,
            &self.blmin,
            self.limits.max_placement_attempts,
        )?;
        let instance_blocks: Vec<usize> = instances.iter().map(|i| i.block).collect();
        let candidate = assemble(
            rng,
            &filled,
            &Assembly {
                full_cell,
                repeat,
                instance_blocks: &instance_blocks,
                surplus: &surplus,
            },
        );

        debug!(
            "generated candidate: {} atom(s) in {} group(s), volume {:.3}",
            candidate.len(),
            candidate.group_count(),
            candidate.cell.volume()
        );
        Ok(candidate)
    }
}
