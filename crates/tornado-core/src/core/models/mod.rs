//! # Core Models Module
//!
//! Data structures that represent an assembled structure: atoms with element data,
//! residues with a resolved classification, and molecules that own both along with
//! the bonds among them.
//!
//! ## Key Components
//!
//! - [`element`] - Element table with covalent and van der Waals radii
//! - [`atom`] - Positioned atoms with optional file metadata
//! - [`residue`] - Residue classification and per-residue atom lookup
//! - [`molecule`] - Atom storage, bond graph and the ordered residue sequence
//! - [`builder`] - Splits an atom-record stream into molecules
//! - [`group`] - Borrowed views over functional groups (base, sugar, phosphate)
//! - [`traits`] - The `HasAtoms`, `HasBonds` and `HasResidueSequence` capabilities
//!
//! Residue neighbors are stored as indices into the owning molecule's residue list
//! rather than as references, so a molecule can be cloned and moved freely.

pub mod atom;
pub mod builder;
pub mod element;
pub mod group;
pub mod ids;
pub mod kind;
pub mod molecule;
pub mod residue;
pub mod secondary;
pub mod topology;
pub mod traits;
