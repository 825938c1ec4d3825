//! Input of atom records.
//!
//! The inference passes never parse coordinate files themselves; they consume a stream
//! of [`AtomRecord`](records::AtomRecord)s. This module defines that record type, the
//! [`AtomRecordFile`](traits::AtomRecordFile) reader interface, and a CSV implementation.

pub mod delimited;
pub mod records;
pub mod traits;
