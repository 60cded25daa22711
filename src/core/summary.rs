//! Per-owner fine totals
//!
//! [`AmountSummary`] holds every category the app displays for one member,
//! computed in a single pass over that member's fines. Summaries of disjoint
//! fine sets merge with `+`, which is how partial folds from concurrent
//! workers are combined.

use crate::types::{Amount, Fine, Importance, PaymentState, ReasonTemplate};
use std::ops::{Add, AddAssign};

/// Category totals for one owner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountSummary {
    /// Fines in the `paid` state
    pub paid: Amount,

    /// Fines in the `unpaid` state
    pub unpaid: Amount,

    /// Unpaid fines of medium or high importance
    pub medium_or_high_unpaid: Amount,

    /// Unpaid fines of high importance
    pub high_unpaid: Amount,

    /// Every fine regardless of payment state
    pub total: Amount,
}

impl AmountSummary {
    /// Fold one fine into the totals
    ///
    /// The caller decides which fines belong to the summary; no owner check
    /// happens here.
    pub fn record(&mut self, fine: &Fine, templates: Option<&[ReasonTemplate]>) {
        let amount = fine.complete_amount(templates);
        self.total += amount;

        match fine.payment_state {
            PaymentState::Paid => self.paid += amount,
            PaymentState::Unpaid => {
                self.unpaid += amount;
                match fine.reason.resolve_importance(templates) {
                    Importance::High => {
                        self.medium_or_high_unpaid += amount;
                        self.high_unpaid += amount;
                    }
                    Importance::Medium => self.medium_or_high_unpaid += amount,
                    Importance::Low => {}
                }
            }
            PaymentState::Settled => {}
        }
    }

    /// Summary of every fine yielded by `fines`
    pub fn from_fines<'a, I>(fines: I, templates: Option<&[ReasonTemplate]>) -> Self
    where
        I: IntoIterator<Item = &'a Fine>,
    {
        fines
            .into_iter()
            .fold(AmountSummary::default(), |mut summary, fine| {
                summary.record(fine, templates);
                summary
            })
    }
}

impl Add for AmountSummary {
    type Output = AmountSummary;

    fn add(self, rhs: AmountSummary) -> AmountSummary {
        AmountSummary {
            paid: self.paid + rhs.paid,
            unpaid: self.unpaid + rhs.unpaid,
            medium_or_high_unpaid: self.medium_or_high_unpaid + rhs.medium_or_high_unpaid,
            high_unpaid: self.high_unpaid + rhs.high_unpaid,
            total: self.total + rhs.total,
        }
    }
}

impl AddAssign for AmountSummary {
    fn add_assign(&mut self, rhs: AmountSummary) {
        *self = *self + rhs;
    }
}
