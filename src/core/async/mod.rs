//! Concurrent aggregation across owners
//!
//! Owners never share fines, so each owner's fines can be folded on its own
//! task and the partial summaries merged afterwards:
//!
//! - **AsyncSummaryStore**: Thread-safe owner → summary map using DashMap
//! - **BatchProcessor**: Partitions a batch by owner and folds each partition
//!   on a tokio task
//!
//! Because summary merging is plain amount addition, the result does not
//! depend on batch boundaries or task completion order.

pub mod batch_processor;
pub mod summary_store;

pub use batch_processor::BatchProcessor;
pub use summary_store::AsyncSummaryStore;
