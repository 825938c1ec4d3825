//! # Workflows Module
//!
//! Top-level entry points that run the analysis passes end to end.
//!
//! - **Structure analysis** ([`analyze`]) - assembles molecules from atom records,
//!   adds bonds, and detects base pairs, duplexes and their helix geometry.

pub mod analyze;
