//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. It reads fines in batches and folds each batch
//! with owner-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (owner partitioning + tokio tasks)
//!     └── AsyncSummaryStore (DashMap of owner summaries)
//! ```
//!
//! Summaries are sums, so the order in which batches and owners finish does
//! not affect the result. Output matches the sync strategy for the same
//! input.

use crate::core::r#async::{AsyncSummaryStore, BatchProcessor};
use crate::io::async_reader::AsyncReader;
use crate::strategy::{ProcessingStrategy, SummaryOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for batch processing
///
/// Controls how fines are batched and the number of worker threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of fines per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// A zero value falls back to the default with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process fines from input file and write owner summaries to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads fines in batches from CSV using AsyncReader
    /// 3. Folds each batch per owner on separate tasks via BatchProcessor
    /// 4. Writes the merged summaries from the AsyncSummaryStore
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, runtime errors, a failed owner task) are
    /// returned immediately and nothing is written. Invalid records are
    /// logged and skipped.
    fn process(
        &self,
        input_path: &Path,
        options: &SummaryOptions,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let store = runtime.block_on(async {
            let store = Arc::new(AsyncSummaryStore::new());
            let processor = BatchProcessor::new(Arc::clone(&store), options.templates.clone());

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads futures::io::AsyncRead, not tokio's
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut processed = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                processed += processor.process_batch(batch).await?;
            }
            info!(
                "Folded {} fines, skipped {} records",
                processed,
                reader.skipped()
            );

            Ok::<_, String>(store)
        })?;

        let summaries = match &options.owner {
            Some(owner) => store
                .get(owner)
                .map(|summary| [(owner.clone(), summary)].into_iter().collect())
                .unwrap_or_default(),
            None => store.get_all_summaries(),
        };

        options.write_summaries(summaries, output)
    }
}
