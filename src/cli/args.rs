use crate::core::AmountFormatter;
use crate::format::{CurrencyFormat, NumericFormat};
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

/// Sum club fines per member
#[derive(Parser, Debug)]
#[command(name = "club-fines")]
#[command(about = "Sum club fines per member", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing fines
    #[arg(value_name = "FINES_CSV", help = "Path to the fines CSV file")]
    pub input_file: PathBuf,

    /// Reason template snapshot
    #[arg(
        long = "templates",
        value_name = "JSON",
        help = "JSON file with the reason templates fines may refer to"
    )]
    pub templates: Option<PathBuf>,

    /// Only output this member
    #[arg(long = "owner", value_name = "ID", help = "Only output the sums of this member")]
    pub owner: Option<String>,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of fines per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of fines per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Currency for amount output
    #[arg(
        long = "currency",
        value_name = "ISO",
        help = "ISO 4217 code; amounts are written as currency, e.g. '1.234,50 €'"
    )]
    pub currency: Option<String>,

    /// Locale for currency output
    #[arg(
        long = "locale",
        value_name = "NAME",
        default_value = "de",
        help = "Locale for digit grouping and decimal mark (with --currency)"
    )]
    pub locale: String,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values use the defaults; zero values are replaced by the
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Build the amount formatter for output
    ///
    /// # Returns
    ///
    /// * The currency formatter if `--currency` was given
    /// * The payment numeric format (`12.50`) otherwise
    /// * `Err(String)` for an unknown locale or currency code
    pub fn to_formatter(&self) -> Result<Arc<dyn AmountFormatter>, String> {
        match &self.currency {
            Some(currency) => Ok(Arc::new(CurrencyFormat::from_codes(
                &self.locale,
                currency,
            )?)),
            None => Ok(Arc::new(NumericFormat::Payment)),
        }
    }
}
