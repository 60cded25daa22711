//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates aggregation by coordinating
//! between the SyncReader (for CSV input) and FineAggregator (for the sums).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Reason resolution and sums to `FineAggregator`
//! - CSV output to `SummaryOptions::write_summaries`
//!
//! # Memory
//!
//! All valid fines are held in memory until the file is read, because the
//! aggregator works over a slice of fines.

use crate::core::FineAggregator;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, SummaryOptions};
use crate::types::Fine;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use club_fines::strategy::{ProcessingStrategy, SummaryOptions, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy
///     .process(Path::new("fines.csv"), &SummaryOptions::default(), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process fines from input file and write owner summaries to output
    ///
    /// 1. Streams fines from the CSV file with a SyncReader
    /// 2. Logs and skips records that fail to parse
    /// 3. Folds the fines with a FineAggregator over the template snapshot
    /// 4. Writes the summaries, filtered to one owner if requested
    fn process(
        &self,
        input_path: &Path,
        options: &SummaryOptions,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let reader = SyncReader::new(input_path)?;

        let mut fines: Vec<Fine> = Vec::new();
        let mut skipped = 0usize;
        for result in reader {
            match result {
                Ok(fine) => fines.push(fine),
                Err(e) => {
                    skipped += 1;
                    warn!("Skipping fine record: {}", e);
                }
            }
        }
        info!("Read {} fines, skipped {} records", fines.len(), skipped);

        let aggregator = FineAggregator::new(&fines, options.templates());
        let summaries = match &options.owner {
            Some(owner) => BTreeMap::from([(owner.clone(), aggregator.summary(owner))]),
            None => aggregator.summaries(),
        };

        options.write_summaries(summaries, output)
    }
}
