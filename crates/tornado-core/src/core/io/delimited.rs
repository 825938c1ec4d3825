use super::records::{AtomRecord, RecordError, RecordSet};
use super::traits::AtomRecordFile;
use std::io::{BufRead, Read};
use tracing::{debug, warn};

const REQUIRED_COLUMNS: [&str; 6] = ["name", "residue_name", "residue_number", "x", "y", "z"];

/// Comma-separated atom records with a header row.
///
/// Columns are matched by header name; the optional ones (`serial`, `alt_loc`,
/// `chain_id`, `insertion_code`, `occupancy`, `temp_factor`, `element`) may be omitted
/// or left empty. Fields are not trimmed, so `" CA "` keeps its padding. Lines
/// starting with `#` are ignored.
pub struct CsvRecordFile;

impl AtomRecordFile for CsvRecordFile {
    type Error = RecordError;

    fn read_from(reader: &mut impl BufRead) -> Result<RecordSet, Self::Error> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::None)
            .comment(Some(b'#'))
            .from_reader(input.as_slice());

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h.trim() == column) {
                return Err(RecordError::InvalidRecord {
                    line: 1,
                    message: format!("missing required column '{column}'"),
                });
            }
        }

        let mut set = RecordSet::default();
        for result in rdr.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(RecordError::Csv(e)),
                Err(e) => {
                    let line = e.position().map_or(0, |p| record_line(&input, p));
                    warn!(line, error = %e, "Skipping malformed atom record");
                    set.skipped.push(RecordError::InvalidRecord {
                        line,
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            let line = row.position().map_or(0, |p| record_line(&input, p));
            let parsed = row
                .deserialize::<AtomRecord>(Some(&headers))
                .map_err(|e| RecordError::InvalidRecord {
                    line,
                    message: e.to_string(),
                })
                .and_then(|record| record.validate(line).map(|()| record));
            match parsed {
                Ok(record) => set.records.push(record),
                Err(e) => {
                    warn!(line, error = %e, "Skipping invalid atom record");
                    set.skipped.push(e);
                }
            }
        }

        debug!(
            records = set.records.len(),
            skipped = set.skipped.len(),
            "Finished reading CSV atom records"
        );
        Ok(set)
    }
}

/// The reader stamps a record with its position before skipping the blank and
/// comment lines in front of it; this walks past them to the row itself.
fn record_line(input: &[u8], pos: &csv::Position) -> u64 {
    let mut line = pos.line();
    let mut rest = input.get(pos.byte() as usize..).unwrap_or_default();
    while let Some(end) = rest.iter().position(|&b| b == b'\n') {
        let text = &rest[..end];
        if text.first() != Some(&b'#') && !text.iter().all(|&b| b == b'\r') {
            break;
        }
        line += 1;
        rest = &rest[end + 1..];
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Write};
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "serial,name,alt_loc,residue_name,chain_id,residue_number,insertion_code,x,y,z,occupancy,temp_factor,element";

    fn read(text: &str) -> Result<RecordSet, RecordError> {
        let mut reader = BufReader::new(Cursor::new(text.as_bytes().to_vec()));
        CsvRecordFile::read_from(&mut reader)
    }

    #[test]
    fn reads_records_and_preserves_name_padding() {
        let text = format!(
            "{HEADER}\n1, CA ,,ALA,A,10,,1.0,2.0,3.0,1.00,12.5,C\n2, P  ,B,G,A,11,A,4.0,5.0,6.0,,,\n"
        );
        let set = read(&text).unwrap();
        assert!(set.skipped.is_empty());
        assert_eq!(set.records.len(), 2);

        let ca = &set.records[0];
        assert_eq!(ca.name, " CA ");
        assert_eq!(ca.alt_loc, None);
        assert_eq!(ca.chain_id, Some('A'));
        assert_eq!(ca.temp_factor, Some(12.5));
        assert_eq!(ca.element.as_deref(), Some("C"));

        let p = &set.records[1];
        assert_eq!(p.alt_loc, Some('B'));
        assert_eq!(p.insertion_code, Some('A'));
        assert_eq!(p.occupancy, None);
        assert_eq!(p.resolve_element().symbol, "P");
    }

    #[test]
    fn optional_columns_may_be_omitted() {
        let text = "name,residue_name,residue_number,x,y,z\n C1',A,1,0.0,0.0,0.0\n";
        let set = read(text).unwrap();
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].chain(), ' ');
        assert_eq!(set.records[0].serial, None);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let text = format!(
            "{HEADER}\n1, N  ,,ALA,A,1,,0.0,0.0,0.0,,,N\n2, CA ,,ALA,A,one,,1.4,0.0,0.0,,,C\n3, C  ,,ALA,A,1,,2.0,1.0,0.0,,,C\n"
        );
        let set = read(&text).unwrap();
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.skipped.len(), 1);
        assert!(matches!(
            set.skipped[0],
            RecordError::InvalidRecord { line: 3, .. }
        ));
    }

    #[test]
    fn skipped_rows_report_their_file_line() {
        let text = format!(
            "{HEADER}\n# chain A\n1, N  ,,ALA,A,1,,0.0,0.0,0.0,,,N\n\n# bad residue number\n2, CA ,,ALA,A,one,,1.4,0.0,0.0,,,C\n3, C  ,,ALA,A,1,,NaN,1.0,0.0,,,C\n"
        );
        let set = read(&text).unwrap();
        assert_eq!(set.records.len(), 1);
        let lines: Vec<u64> = set
            .skipped
            .iter()
            .map(|e| match e {
                RecordError::InvalidRecord { line, .. } => *line,
                other => panic!("unexpected error {other}"),
            })
            .collect();
        assert_eq!(lines, vec![6, 7]);
    }

    #[test]
    fn crlf_rows_after_comments_keep_their_line() {
        let text = format!(
            "{HEADER}\r\n1, N  ,,ALA,A,1,,0.0,0.0,0.0,,,N\r\n# note\r\n\r\n2, CA ,,ALA,A,one,,1.4,0.0,0.0,,,C\r\n"
        );
        let set = read(&text).unwrap();
        assert_eq!(set.records.len(), 1);
        assert!(matches!(
            set.skipped[..],
            [RecordError::InvalidRecord { line: 5, .. }]
        ));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let result = read("name,residue_name,x,y,z\n CA ,ALA,0,0,0\n");
        assert!(matches!(result, Err(RecordError::InvalidRecord { line: 1, .. })));
    }

    #[test]
    fn comment_lines_are_ignored() {
        let text = format!("{HEADER}\n# generated by hand\n1, O  ,,HOH,W,1,,0.0,0.0,0.0,,,O\n");
        let set = read(&text).unwrap();
        assert_eq!(set.records.len(), 1);
    }

    #[test]
    fn reads_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1, C  ,,GLY,A,1,,0.0,0.0,0.0,,,C").unwrap();
        let set = CsvRecordFile::read_from_path(file.path()).unwrap();
        assert_eq!(set.records.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = CsvRecordFile::read_from_path("/no/such/atoms.csv");
        assert!(matches!(result, Err(RecordError::Io(_))));
    }
}
