//! Fines issued to club members
//!
//! A fine pairs a [`FineReason`] with the member it was issued to, how many
//! times it applies and where it stands in the payment flow.

use crate::types::amount::Amount;
use crate::types::error::FineError;
use crate::types::fine_reason::{FineReason, ReasonTemplate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Club member identifier
pub type OwnerId = String;

/// Fine identifier
pub type FineId = String;

/// Payment state of a fine
///
/// The legacy backend spells the first two `payed` / `unpayed`, both are
/// accepted when decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    /// Not paid yet
    #[default]
    #[serde(alias = "unpayed")]
    Unpaid,

    /// Paid through the payment gateway, waiting for the cashier to confirm
    Settled,

    /// Paid and confirmed
    #[serde(alias = "payed")]
    Paid,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Unpaid => "unpaid",
            PaymentState::Settled => "settled",
            PaymentState::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentState {
    type Err = FineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unpaid" | "unpayed" => Ok(PaymentState::Unpaid),
            "settled" => Ok(PaymentState::Settled),
            "paid" | "payed" => Ok(PaymentState::Paid),
            _ => Err(FineError::invalid_payment_state(s)),
        }
    }
}

/// A fine as stored by the club backend
///
/// Fines are read-only to aggregation; nothing in this crate mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fine {
    pub id: FineId,

    /// Member the fine was issued to
    #[serde(alias = "personId")]
    pub owner_id: OwnerId,

    pub reason: FineReason,

    /// Number of occurrences, at least one for any fine the app creates
    #[serde(alias = "number")]
    pub count: u32,

    #[serde(alias = "payed")]
    pub payment_state: PaymentState,
}

impl Fine {
    pub fn new(
        id: impl Into<FineId>,
        owner_id: impl Into<OwnerId>,
        reason: FineReason,
        count: u32,
        payment_state: PaymentState,
    ) -> Self {
        Fine {
            id: id.into(),
            owner_id: owner_id.into(),
            reason,
            count,
            payment_state,
        }
    }

    /// Resolved amount of the reason times the number of occurrences
    pub fn complete_amount(&self, templates: Option<&[ReasonTemplate]>) -> Amount {
        self.reason.resolve_amount(templates) * self.count
    }
}
