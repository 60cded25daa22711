//! Asynchronous CSV reader with batch interface
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Fines
//!                  ↓
//!           csv_format module
//!           (FineCsvRecord, convert_fine_record)
//! ```

use crate::io::csv_format::{convert_fine_record, FineCsvRecord};
use crate::types::Fine;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Upper bound on the capacity reserved up front for one batch
const MAX_PREALLOCATED_BATCH: usize = 1024;

/// Asynchronous CSV reader
///
/// Provides batch reading interface over fines.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    skipped: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            skipped: 0,
        }
    }

    /// Read a batch of fines
    ///
    /// Reads up to `batch_size` records from the CSV data. Invalid records
    /// are logged and skipped. At most `MAX_PREALLOCATED_BATCH` slots are
    /// reserved up front; larger batches grow as records arrive.
    ///
    /// # Returns
    ///
    /// A vector of successfully converted fines.
    /// Returns an empty vector when the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Fine> {
        let mut batch = Vec::with_capacity(batch_size.min(MAX_PREALLOCATED_BATCH));
        let mut records = self.csv_reader.deserialize::<FineCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_fine_record(csv_record) {
                    Ok(fine) => batch.push(fine),
                    Err(e) => {
                        self.skipped += 1;
                        warn!("Skipping fine record: {}", e);
                    }
                },
                Some(Err(e)) => {
                    self.skipped += 1;
                    warn!("CSV parse error: {}", e);
                }
                None => break,
            }
        }

        batch
    }

    /// Number of records skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
