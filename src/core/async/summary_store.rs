//! Thread-safe owner summaries for async batch processing
//!
//! `AsyncSummaryStore` keeps one [`AmountSummary`] per owner in a `DashMap`,
//! so workers folding different owners never contend on a global lock.

use crate::core::summary::AmountSummary;
use crate::types::OwnerId;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// Concurrent owner → summary map
#[derive(Debug, Default)]
pub struct AsyncSummaryStore {
    summaries: DashMap<OwnerId, AmountSummary>,
}

impl AsyncSummaryStore {
    pub fn new() -> Self {
        Self {
            summaries: DashMap::new(),
        }
    }

    /// Add a partial summary to the owner's running totals
    ///
    /// The entry stays locked while the addition runs, so concurrent merges
    /// for the same owner cannot lose an update.
    pub fn merge(&self, owner_id: OwnerId, partial: AmountSummary) {
        *self.summaries.entry(owner_id).or_default() += partial;
    }

    /// Current totals of one owner
    pub fn get(&self, owner_id: &str) -> Option<AmountSummary> {
        self.summaries.get(owner_id).map(|entry| *entry.value())
    }

    /// Snapshot of all summaries, sorted by owner id
    pub fn get_all_summaries(&self) -> BTreeMap<OwnerId, AmountSummary> {
        self.summaries
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}
