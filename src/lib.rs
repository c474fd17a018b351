//! Random starting structures for periodic bulk crystal structure search.
//!
//! Given building blocks (atoms or rigid molecules) with target counts, a
//! cell volume and minimum interatomic distances, [`StartGenerator`] produces
//! random periodic candidates that respect every distance constraint. Such
//! candidates seed global optimizers like genetic algorithms, which then
//! relax and evolve them.
//!
//! # Features
//!
//! - **Random cells**: lower-triangular lattices at the target volume,
//!   optionally filtered by [`CellBounds`] or any custom [`CellValidator`],
//!   or a fixed cell supplied by the caller
//! - **Cell splitting**: a weighted [`SplitScheme`] builds the structure from
//!   identical subcells, which biases candidates toward symmetric packings
//! - **Rigid blocks**: molecules are placed whole with random orientations
//!   and never split across the assembled structure
//! - **Reproducibility**: all randomness comes from the caller's
//!   [`rand::Rng`], so a seeded generator gives identical candidates
//! - **Declarative setup**: a [`GeneratorConfig`] can be read from TOML
//!
//! # Quick Start
//!
//! ```
//! use bulk_startgen::{DistanceSpec, Element, Options, StartGenerator};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Eight silicon atoms and two water molecules in 200 Å³, with minimum
//! // distances at 70% of the summed covalent radii.
//! let generator = StartGenerator::new(
//!     [("Si", 8), ("H2O", 2)],
//!     DistanceSpec::CovalentRatio(0.7),
//!     200.0,
//!     Options::default(),
//! )?;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let candidate = generator.generate_candidate(&mut rng)?;
//!
//! assert_eq!(candidate.composition()[&Element::Si], 8);
//! assert_eq!(candidate.composition()[&Element::O], 2);
//! assert_eq!(candidate.composition()[&Element::H], 4);
//! assert!((candidate.cell.volume() - 200.0).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Data Types
//!
//! - [`Element`] – Chemical element (H through Cm) with covalent radius
//! - [`Atom`] – Single atom with element and Cartesian coordinates
//! - [`Cell`] – Lattice vectors of a periodic cell
//! - [`Fragment`] – Rigid group of atoms placed as one block
//! - [`Structure`] – Periodic structure with per-atom origin groups
//!
//! # Configuration
//!
//! - [`BlockSpec`] – A block given by fragment, element symbol or molecule name
//! - [`DistanceSpec`] – Explicit [`DistanceTable`] or covalent-radius ratio
//! - [`Options`] – Cell bounds, fixed cell, split scheme and attempt limits
//! - [`GeneratorConfig`] – The whole setup as a TOML document

mod model;
mod startgen;

pub use model::atom::Atom;
pub use model::cell::Cell;
pub use model::fragment::Fragment;
pub use model::molecules::{molecule, molecule_names};
pub use model::structure::{PeriodicImages, Structure};
pub use model::types::{Element, ParseElementError};

pub use startgen::{
    AttemptLimits, BlockConfig, BlockSpec, CellBounds, CellValidator, ConfigError,
    DistanceConfig, DistanceEntry, DistanceSpec, DistanceTable, GenerationError,
    GeneratorConfig, Options, Split, SplitConfig, SplitScheme, StartGenerator, atoms_too_close,
};
