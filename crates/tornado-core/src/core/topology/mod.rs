//! # Residue Topology
//!
//! Static knowledge about residue types: which codes denote amino acids, nucleotides
//! and solvent ([`codes`]), which atom-name pairs are bonded within and between
//! residues ([`bonds`]), and the immutable [`registry::ResidueRegistry`] that ties
//! them together.
//!
//! The registry is built once through [`registry::RegistryBuilder`] and then passed
//! by reference to whatever needs to classify residues. Nothing here is mutated after
//! construction, so a registry can be shared freely across threads.

pub mod bonds;
pub mod codes;
pub mod registry;
