//! Batch processing with owner-based partitioning
//!
//! `BatchProcessor` splits a batch of fines by owner and folds every owner's
//! fines into an [`AmountSummary`] on its own tokio task. Partial summaries
//! are merged into the shared [`AsyncSummaryStore`].
//!
//! ```text
//! BatchProcessor
//!     ├── Arc<AsyncSummaryStore>        (shared owner totals)
//!     └── Option<Arc<[ReasonTemplate]>> (template snapshot, read-only)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncSummaryStore;
use crate::core::summary::AmountSummary;
use crate::types::{Fine, OwnerId, ReasonTemplate};
use tokio::task::JoinHandle;
use tracing::error;

/// Batch processor with owner-based partitioning
///
/// Cloning is cheap; clones share the store and the template snapshot.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    store: Arc<AsyncSummaryStore>,
    templates: Option<Arc<[ReasonTemplate]>>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `store` - Shared summary store receiving the partial totals
    /// * `templates` - Template snapshot used for every batch, `None` if not loaded
    pub fn new(store: Arc<AsyncSummaryStore>, templates: Option<Arc<[ReasonTemplate]>>) -> Self {
        Self { store, templates }
    }

    /// Partition a batch of fines by owner, keeping input order per owner
    pub fn partition_by_owner(&self, batch: Vec<Fine>) -> HashMap<OwnerId, Vec<Fine>> {
        let mut owner_batches: HashMap<OwnerId, Vec<Fine>> = HashMap::new();

        for fine in batch {
            owner_batches
                .entry(fine.owner_id.clone())
                .or_default()
                .push(fine);
        }

        owner_batches
    }

    /// Fold one owner's fines against the template snapshot
    pub fn summarize(&self, fines: &[Fine]) -> AmountSummary {
        AmountSummary::from_fines(fines, self.templates.as_deref())
    }

    /// Process a batch of fines with owner-based partitioning
    ///
    /// Spawns one task per owner in the batch and waits for all of them.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of fines folded into the store
    /// * `Err(String)` - A task failed; the store is missing that owner's
    ///   fines and must not be reported
    pub async fn process_batch(&self, batch: Vec<Fine>) -> Result<usize, String> {
        let owner_batches = self.partition_by_owner(batch);

        let mut tasks = Vec::with_capacity(owner_batches.len());
        for (owner_id, fines) in owner_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                let summary = processor.summarize(&fines);
                processor.store.merge(owner_id, summary);
                fines.len()
            }));
        }

        join_summary_tasks(tasks).await
    }
}

/// Wait for every task and add up their fine counts
///
/// All tasks are awaited even after a failure so none is left running
/// against the store.
async fn join_summary_tasks(tasks: Vec<JoinHandle<usize>>) -> Result<usize, String> {
    let mut processed = 0;
    let mut failed = 0;
    for task in tasks {
        match task.await {
            Ok(count) => processed += count,
            Err(e) => {
                failed += 1;
                error!("Summary task failed: {:?}", e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} owner summary task(s) failed", failed));
    }
    Ok(processed)
}
