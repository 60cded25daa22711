//! Fine aggregation
//!
//! This module provides the [`FineAggregator`], which folds a collection of
//! fines into the totals the app displays for a member.
//!
//! Each fine contributes its resolved reason amount times its count. The
//! template snapshot is passed in by the caller and stays fixed for the
//! lifetime of the aggregator, so every total computed from one aggregator
//! sees the same template list. Nothing here mutates a fine.

use crate::core::summary::AmountSummary;
use crate::types::{Amount, Fine, Importance, OwnerId, PaymentState, ReasonTemplate};
use std::collections::BTreeMap;

/// Read-only view over fines and a template snapshot
#[derive(Debug, Clone, Copy)]
pub struct FineAggregator<'a> {
    fines: &'a [Fine],
    templates: Option<&'a [ReasonTemplate]>,
}

impl<'a> FineAggregator<'a> {
    /// Create an aggregator over `fines`
    ///
    /// # Arguments
    ///
    /// * `fines` - All fines known to the caller, any owner
    /// * `templates` - Reason template snapshot, `None` if not loaded
    pub fn new(fines: &'a [Fine], templates: Option<&'a [ReasonTemplate]>) -> Self {
        FineAggregator { fines, templates }
    }

    fn fines_of<'b>(&'b self, owner_id: &'b str) -> impl Iterator<Item = &'a Fine> + 'b {
        self.fines
            .iter()
            .filter(move |fine| fine.owner_id == owner_id)
    }

    fn sum_where<P>(&self, owner_id: &str, predicate: P) -> Amount
    where
        P: Fn(&Fine) -> bool,
    {
        self.fines_of(owner_id)
            .filter(|&fine| predicate(fine))
            .map(|fine| fine.complete_amount(self.templates))
            .sum()
    }

    fn importance_of(&self, fine: &Fine) -> Importance {
        fine.reason.resolve_importance(self.templates)
    }

    /// Sum of the owner's paid fines
    pub fn paid_sum(&self, owner_id: &str) -> Amount {
        self.sum_where(owner_id, |fine| fine.payment_state == PaymentState::Paid)
    }

    /// Sum of the owner's unpaid fines
    pub fn unpaid_sum(&self, owner_id: &str) -> Amount {
        self.sum_where(owner_id, |fine| fine.payment_state == PaymentState::Unpaid)
    }

    /// Sum of the owner's unpaid fines of medium or high importance
    pub fn medium_or_high_unpaid_sum(&self, owner_id: &str) -> Amount {
        self.sum_where(owner_id, |fine| {
            fine.payment_state == PaymentState::Unpaid
                && matches!(
                    self.importance_of(fine),
                    Importance::Medium | Importance::High
                )
        })
    }

    /// Sum of the owner's unpaid fines of high importance
    pub fn high_unpaid_sum(&self, owner_id: &str) -> Amount {
        self.sum_where(owner_id, |fine| {
            fine.payment_state == PaymentState::Unpaid
                && self.importance_of(fine) == Importance::High
        })
    }

    /// Sum of all the owner's fines, whatever their payment state
    pub fn total_sum(&self, owner_id: &str) -> Amount {
        self.sum_where(owner_id, |_| true)
    }

    /// Amount to charge for a checkout of the given fines
    ///
    /// Owner and payment state are not checked; ids that match no fine are
    /// ignored.
    pub fn selected_sum<S: AsRef<str>>(&self, fine_ids: &[S]) -> Amount {
        self.fines
            .iter()
            .filter(|fine| fine_ids.iter().any(|id| id.as_ref() == fine.id))
            .map(|fine| fine.complete_amount(self.templates))
            .sum()
    }

    /// Every category for one owner in a single pass
    pub fn summary(&self, owner_id: &str) -> AmountSummary {
        AmountSummary::from_fines(self.fines_of(owner_id), self.templates)
    }

    /// Summaries of every owner that has at least one fine, keyed by owner
    pub fn summaries(&self) -> BTreeMap<OwnerId, AmountSummary> {
        let mut summaries: BTreeMap<OwnerId, AmountSummary> = BTreeMap::new();
        for fine in self.fines {
            summaries
                .entry(fine.owner_id.clone())
                .or_default()
                .record(fine, self.templates);
        }
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FineReason;
    use rstest::{fixture, rstest};

    #[fixture]
    fn templates() -> Vec<ReasonTemplate> {
        vec![
            ReasonTemplate {
                id: "late".to_string(),
                description: "Late to training".to_string(),
                amount: Amount::new(5, 0),
                importance: Importance::High,
            },
            ReasonTemplate {
                id: "shirt".to_string(),
                description: "Forgot shirt".to_string(),
                amount: Amount::new(1, 50),
                importance: Importance::Medium,
            },
        ]
    }

    #[fixture]
    fn fines() -> Vec<Fine> {
        vec![
            Fine::new(
                "1",
                "p",
                FineReason::custom("Red card", Amount::new(10, 0), Importance::High),
                2,
                PaymentState::Unpaid,
            ),
            Fine::new(
                "2",
                "p",
                FineReason::custom("Yellow card", Amount::new(3, 0), Importance::Low),
                1,
                PaymentState::Paid,
            ),
        ]
    }

    #[rstest]
    fn test_category_sums(fines: Vec<Fine>) {
        let aggregator = FineAggregator::new(&fines, None);
        assert_eq!(aggregator.unpaid_sum("p"), Amount::new(20, 0));
        assert_eq!(aggregator.paid_sum("p"), Amount::new(3, 0));
        assert_eq!(aggregator.total_sum("p"), Amount::new(23, 0));
        assert_eq!(aggregator.high_unpaid_sum("p"), Amount::new(20, 0));
        assert_eq!(aggregator.medium_or_high_unpaid_sum("p"), Amount::new(20, 0));
    }

    #[rstest]
    fn test_other_owner_is_excluded(mut fines: Vec<Fine>) {
        fines.push(Fine::new(
            "3",
            "q",
            FineReason::custom("Red card", Amount::new(50, 0), Importance::High),
            1,
            PaymentState::Unpaid,
        ));
        let aggregator = FineAggregator::new(&fines, None);
        assert_eq!(aggregator.total_sum("p"), Amount::new(23, 0));
        assert_eq!(aggregator.total_sum("q"), Amount::new(50, 0));
        assert_eq!(aggregator.total_sum("nobody"), Amount::ZERO);
    }

    #[rstest]
    fn test_template_fines_resolve_against_snapshot(templates: Vec<ReasonTemplate>) {
        let fines = vec![
            Fine::new("1", "p", FineReason::template("late"), 2, PaymentState::Unpaid),
            Fine::new("2", "p", FineReason::template("shirt"), 3, PaymentState::Unpaid),
            Fine::new("3", "p", FineReason::template("deleted"), 9, PaymentState::Unpaid),
            Fine::new("4", "p", FineReason::template("late"), 1, PaymentState::Settled),
        ];
        let aggregator = FineAggregator::new(&fines, Some(templates.as_slice()));
        assert_eq!(aggregator.unpaid_sum("p"), Amount::new(14, 50));
        assert_eq!(aggregator.medium_or_high_unpaid_sum("p"), Amount::new(14, 50));
        assert_eq!(aggregator.high_unpaid_sum("p"), Amount::new(10, 0));
        assert_eq!(aggregator.paid_sum("p"), Amount::ZERO);
        assert_eq!(aggregator.total_sum("p"), Amount::new(19, 50));
    }

    #[test]
    fn test_template_fines_without_snapshot_are_zero() {
        let fines = vec![Fine::new(
            "1",
            "p",
            FineReason::template("late"),
            2,
            PaymentState::Unpaid,
        )];
        let aggregator = FineAggregator::new(&fines, None);
        assert_eq!(aggregator.unpaid_sum("p"), Amount::ZERO);
        assert_eq!(aggregator.high_unpaid_sum("p"), Amount::ZERO);
    }

    #[rstest]
    fn test_summary_matches_individual_sums(fines: Vec<Fine>, templates: Vec<ReasonTemplate>) {
        let aggregator = FineAggregator::new(&fines, Some(templates.as_slice()));
        let summary = aggregator.summary("p");
        assert_eq!(summary.paid, aggregator.paid_sum("p"));
        assert_eq!(summary.unpaid, aggregator.unpaid_sum("p"));
        assert_eq!(
            summary.medium_or_high_unpaid,
            aggregator.medium_or_high_unpaid_sum("p")
        );
        assert_eq!(summary.high_unpaid, aggregator.high_unpaid_sum("p"));
        assert_eq!(summary.total, aggregator.total_sum("p"));
    }

    #[rstest]
    fn test_fold_order_does_not_matter(fines: Vec<Fine>) {
        let reversed: Vec<Fine> = fines.iter().rev().cloned().collect();
        assert_eq!(
            FineAggregator::new(&fines, None).summary("p"),
            FineAggregator::new(&reversed, None).summary("p")
        );
    }

    #[rstest]
    #[case::one(&["1"], Amount::new(20, 0))]
    #[case::both(&["1", "2"], Amount::new(23, 0))]
    #[case::unknown(&["404"], Amount::ZERO)]
    fn test_selected_sum(fines: Vec<Fine>, #[case] ids: &[&str], #[case] expected: Amount) {
        let aggregator = FineAggregator::new(&fines, None);
        assert_eq!(aggregator.selected_sum(ids), expected);
    }

    #[rstest]
    fn test_summaries_sorted_by_owner(mut fines: Vec<Fine>) {
        fines.insert(
            0,
            Fine::new(
                "3",
                "z",
                FineReason::custom("Late", Amount::new(1, 0), Importance::Low),
                1,
                PaymentState::Paid,
            ),
        );
        let summaries = FineAggregator::new(&fines, None).summaries();
        let owners: Vec<&str> = summaries.keys().map(String::as_str).collect();
        assert_eq!(owners, vec!["p", "z"]);
        assert_eq!(summaries["p"].total, Amount::new(23, 0));
        assert_eq!(summaries["z"].paid, Amount::new(1, 0));
    }
}
