//! # Core Module
//!
//! Stateless building blocks shared by every analysis pass.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, molecules and bonds
//! - **Geometry** ([`geometry`]) - Plane fitting, spatial hashing and simple shapes
//! - **Structural Knowledge** ([`topology`]) - Residue codes, bond dictionaries and the registry
//! - **Record Input** ([`io`]) - The atom-record stream and its CSV reader

pub mod geometry;
pub mod io;
pub mod models;
pub mod topology;
