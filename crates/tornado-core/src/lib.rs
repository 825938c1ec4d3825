//! # Tornado Core Library
//!
//! Structural inference for macromolecules: covalent bonds from raw coordinates,
//! residue and molecule classification, nucleic-acid base pairing, and the helical
//! geometry of base-paired duplexes.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Residue`,
//!   `Atom`), geometry primitives (`Plane3D`, `SpatialHash3D`), residue registries
//!   and atom-record input.
//!
//! - **[`analysis`]: The Inference Passes.** Bond inference, residue linking,
//!   base-pair detection, duplex clustering and helix estimation, each driven by
//!   `AnalysisConfig`.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `analysis` together into a
//!   single call that turns a stream of atom records into annotated molecules.

pub mod analysis;
pub mod core;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;
