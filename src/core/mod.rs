//! Core business logic module
//!
//! This module contains the aggregation components:
//! - `traits` - Collaborator seams (display formatting)
//! - `summary` - Per-owner category totals
//! - `aggregator` - Category sums over a fine collection
//! - `async` - Concurrent aggregation across owners

pub mod aggregator;
pub mod r#async;
pub mod summary;
pub mod traits;

pub use aggregator::FineAggregator;
pub use r#async::{AsyncSummaryStore, BatchProcessor};
pub use summary::AmountSummary;
pub use traits::AmountFormatter;
