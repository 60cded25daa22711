//! Club Fines CLI
//!
//! Sums the fines of every club member from a CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- fines.csv > sums.csv
//! cargo run -- --templates templates.json fines.csv > sums.csv
//! cargo run -- --templates templates.json --owner alice --currency EUR fines.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 fines.csv > sums.csv
//! ```
//!
//! Per-member sums go to stdout as CSV. Diagnostics go to stderr through
//! `tracing`; set `RUST_LOG` (e.g. `RUST_LOG=club_fines=info`) for more.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, unreadable template snapshot, bad currency, etc.)

use club_fines::cli;
use club_fines::io::load_templates;
use club_fines::strategy::{self, SummaryOptions};
use std::process;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("club_fines=warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber is already installed");
    }
}

fn run(args: cli::CliArgs) -> Result<(), String> {
    let templates = match &args.templates {
        Some(path) => Some(Arc::from(load_templates(path).map_err(|e| e.to_string())?)),
        None => None,
    };

    let options = SummaryOptions {
        templates,
        owner: args.owner.clone(),
        formatter: args.to_formatter()?,
    };

    let config = if args.strategy == cli::StrategyType::Async {
        Some(args.to_batch_config())
    } else {
        None
    };
    let strategy = strategy::create_strategy(args.strategy, config);

    let mut output = std::io::stdout();
    strategy.process(&args.input_file, &options, &mut output)
}

fn main() {
    init_tracing();

    let args = cli::parse_args();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
