//! # Analysis Module
//!
//! The inference passes that turn assembled molecules into annotated structures.
//!
//! Passes run in a fixed order on each molecule:
//!
//! 1. **Dictionary and linkage bonds** ([`linkage`]) - bonds known by atom name
//! 2. **Distance bonds** ([`bonds`]) - bonds inferred from element radii
//! 3. **Base pairs** ([`base_pairs`]) - plane and contact tests on nucleotide bases
//! 4. **Duplexes** ([`duplex`]) - single-linkage clustering of base pairs
//! 5. **Helix geometry** ([`helix`]) - axis, enclosing cylinder and residue wedges
//!
//! Every threshold lives in [`config::AnalysisConfig`]. A failure on one residue,
//! base pair or duplex is logged and skipped; it never aborts the rest of the
//! structure.

pub mod base_pairs;
pub mod bonds;
pub mod config;
pub mod duplex;
pub mod error;
pub mod helix;
pub mod linkage;
pub mod progress;
