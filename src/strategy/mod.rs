//! Processing strategy module for fine aggregation
//!
//! This module defines the Strategy pattern for complete aggregation pipelines,
//! encompassing CSV parsing, reason resolution and summary output. This allows
//! different implementations (synchronous, asynchronous batch) to be selected
//! at runtime.

use crate::cli::StrategyType;
use crate::core::{AmountFormatter, AmountSummary};
use crate::format::NumericFormat;
use crate::io::csv_format::write_summaries_csv;
use crate::types::{OwnerId, ReasonTemplate};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// What to resolve against and how to write the result
///
/// Shared by every strategy so that both produce identical output for the
/// same options.
#[derive(Clone)]
pub struct SummaryOptions {
    /// Template snapshot, `None` when no snapshot was loaded
    pub templates: Option<Arc<[ReasonTemplate]>>,

    /// Restrict output to this owner
    pub owner: Option<OwnerId>,

    /// Renders every amount cell
    pub formatter: Arc<dyn AmountFormatter>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            templates: None,
            owner: None,
            formatter: Arc::new(NumericFormat::Payment),
        }
    }
}

impl std::fmt::Debug for SummaryOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryOptions")
            .field("templates", &self.templates.as_ref().map(|t| t.len()))
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl SummaryOptions {
    /// Template snapshot as a borrowed slice
    pub fn templates(&self) -> Option<&[ReasonTemplate]> {
        self.templates.as_deref()
    }

    /// Apply the owner filter and write the summaries as CSV
    ///
    /// A requested owner without any fines still gets a row of zeros.
    pub fn write_summaries(
        &self,
        mut summaries: BTreeMap<OwnerId, AmountSummary>,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        if let Some(owner) = &self.owner {
            let summary = summaries.remove(owner).unwrap_or_default();
            summaries = BTreeMap::from([(owner.clone(), summary)]);
        }

        write_summaries_csv(&summaries, self.formatter.as_ref(), output)
    }
}

/// Processing strategy trait for complete aggregation pipelines
///
/// Each strategy must be able to read fines from a CSV file, fold them into
/// per-owner summaries and write those summaries to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process fines from input file and write owner summaries to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing fines
    /// * `options` - Template snapshot, owner filter and amount formatter
    /// * `output` - Mutable reference to a writer for the summary CSV
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed successfully (or with skipped records)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// Individual record errors are logged but do not cause this method to
    /// return an error. Processing continues with the next record.
    fn process(
        &self,
        input_path: &Path,
        options: &SummaryOptions,
        output: &mut dyn Write,
    ) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
