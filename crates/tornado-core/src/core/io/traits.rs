use super::records::RecordSet;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Interface for formats that yield a stream of atom records.
///
/// Malformed individual records are not fatal: implementors collect them in
/// [`RecordSet::skipped`] and keep reading. Only failures that prevent reading the
/// input at all are returned as errors.
pub trait AtomRecordFile {
    /// The error type for unrecoverable read failures.
    type Error: Error + From<io::Error>;

    /// Reads all records from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or lacks required structure
    /// (such as a header).
    fn read_from(reader: &mut impl BufRead) -> Result<RecordSet, Self::Error>;

    /// Reads all records from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or [`Self::read_from`] fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<RecordSet, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
