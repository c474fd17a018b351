//! Core data structures for periodic atomic structures.
//!
//! - [`types`] – Chemical elements with covalent radii.
//! - [`atom`] – Element plus Cartesian position.
//! - [`cell`] – Lattice vectors and fractional/Cartesian conversion.
//! - [`fragment`] – Rigid atom groups used as building blocks.
//! - [`molecules`] – Built-in molecular geometries by formula.
//! - [`structure`] – Periodic structures with per-atom origin groups.

pub mod atom;
pub mod cell;
pub mod fragment;
pub mod molecules;
pub mod structure;
pub mod types;
