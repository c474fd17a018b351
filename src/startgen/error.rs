//! Error types for the start generator.
//!
//! Construction-time problems surface as [`ConfigError`] before any random
//! number is drawn; failures to converge while sampling a candidate surface
//! as [`GenerationError`].

use crate::model::types::Element;
use thiserror::Error;

/// Malformed or inconsistent generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Target volume is not a positive finite number.
    #[error("target volume must be positive and finite, got {0}")]
    InvalidVolume(f64),

    /// No building blocks were supplied.
    #[error("at least one building block is required")]
    NoBlocks,

    /// A building block contains no atoms.
    #[error("building block {index} contains no atoms")]
    EmptyBlock {
        /// Position of the block in the configuration.
        index: usize,
    },

    /// A block name is neither an element symbol nor a known molecule.
    #[error("'{0}' is neither an element symbol nor a known molecule")]
    UnknownBlock(String),

    /// A block entry in a declarative config names both or neither of
    /// `name` and `atoms`.
    #[error("block {index} must specify exactly one of `name` or `atoms`")]
    AmbiguousBlock {
        /// Position of the block in the configuration.
        index: usize,
    },

    /// The minimum-distance table lacks a required element pair.
    #[error("minimum distance table has no entry for ({a}, {b})")]
    MissingDistance {
        /// First element of the pair.
        a: Element,
        /// Second element of the pair.
        b: Element,
    },

    /// A minimum distance is negative or not finite.
    #[error("minimum distance for ({a}, {b}) must be finite and non-negative, got {distance}")]
    InvalidDistance {
        /// First element of the pair.
        a: Element,
        /// Second element of the pair.
        b: Element,
        /// The offending value.
        distance: f64,
    },

    /// Covalent radius ratio is negative or not finite.
    #[error("covalent radius ratio must be finite and non-negative, got {0}")]
    InvalidRatio(f64),

    /// A declarative distance spec names both or neither of `ratio` and
    /// `table`.
    #[error("minimum distances must specify exactly one of `ratio` or `table`")]
    AmbiguousDistances,

    /// Split weights or factors are unusable.
    #[error("invalid split scheme: {0}")]
    InvalidSplits(String),

    /// The fixed cell has (near) zero volume.
    #[error("fixed cell is degenerate (volume {0})")]
    DegenerateCell(f64),

    /// A retry ceiling of zero would make every request fail.
    #[error("attempt limits must be at least 1")]
    InvalidLimits,

    /// The TOML document could not be parsed.
    #[error("failed to parse generator configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure to produce a candidate within the configured attempt limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No cell satisfied the bounds and minimum-length constraints.
    #[error("no valid cell found after {attempts} attempts")]
    CellSampling {
        /// Number of cells sampled.
        attempts: u32,
    },

    /// A block instance could not be placed without violating a minimum
    /// distance.
    #[error("could not place instance {instance} of block {block} after {attempts} attempts")]
    Placement {
        /// Position of the instance in the shuffled placement order.
        instance: usize,
        /// Index of the configured block.
        block: usize,
        /// Number of positions tried.
        attempts: u32,
    },

    /// The cell to be filled has no volume.
    #[error("cannot place atoms in a degenerate cell")]
    DegenerateCell,
}

impl ConfigError {
    /// Creates a [`MissingDistance`](ConfigError::MissingDistance) error with
    /// the pair in sorted order.
    pub fn missing_distance(a: Element, b: Element) -> Self {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Self::MissingDistance { a, b }
    }

    /// Creates an [`InvalidSplits`](ConfigError::InvalidSplits) error.
    pub fn invalid_splits(detail: impl Into<String>) -> Self {
        Self::InvalidSplits(detail.into())
    }
}
