//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over fines from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding Result<Fine, String>
//! for each CSV row:
//!
//! ```no_run
//! use club_fines::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("fines.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(fine) => println!("Fine {} for {}", fine.id, fine.owner_id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_fine_record, FineCsvRecord};
use crate::types::Fine;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one record at a time; memory use does not grow with the file.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader trims whitespace from all fields; blank cells read as
    /// missing values.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<Fine, String>;

    /// Get the next fine from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Fine))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<FineCsvRecord>();

        let result = deserializer.next()?;
        self.line_num += 1;

        // +1 for the header row
        let line = self.line_num + 1;
        Some(match result {
            Ok(csv_record) => {
                convert_fine_record(csv_record).map_err(|e| format!("Line {}: {}", line, e))
            }
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, FineReason, Importance, PaymentState};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,owner,template_id,description,amount,importance,count,state\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .expect("Failed to write to temp file");
        file.write_all(rows.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_reads_both_reason_shapes() {
        let file = create_temp_csv(
            "f1,alice,late,,,,2,unpaid\n\
             f2,bob,,Forgot kit,2.50,medium,1,paid\n",
        );

        let fines: Vec<_> = SyncReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(fines.len(), 2);
        assert_eq!(fines[0].reason, FineReason::template("late"));
        assert_eq!(fines[0].count, 2);
        assert_eq!(
            fines[1].reason,
            FineReason::custom("Forgot kit", Amount::new(2, 50), Importance::Medium)
        );
        assert_eq!(fines[1].payment_state, PaymentState::Paid);
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv(
            "f1,alice,late,,,,1,unpaid\n\
             f2,alice,,Late,abc,low,1,unpaid\n\
             f3,alice,late,,,,1,paid\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());

        // Line 3 because of header
        let error = records[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3"), "{}", error);
        assert!(error.contains("Invalid amount"));
    }

    #[test]
    fn test_sync_reader_reports_unparsable_count() {
        let file = create_temp_csv("f1,alice,late,,,,many,unpaid\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 1);
        assert!(records[0].as_ref().unwrap_err().contains("CSV parse error"));
    }

    #[test]
    fn test_sync_reader_handles_whitespace_and_blank_cells() {
        let file = create_temp_csv("  f1 ,  alice  ,  late  , , , , , \n");

        let fines: Vec<_> = SyncReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(fines.len(), 1);
        assert_eq!(fines[0].id, "f1");
        assert_eq!(fines[0].owner_id, "alice");
        assert_eq!(fines[0].count, 1);
        assert_eq!(fines[0].payment_state, PaymentState::Unpaid);
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("");
        assert_eq!(SyncReader::new(file.path()).unwrap().count(), 0);
    }
}
