//! Collaborator seams of the core
//!
//! The core guarantees exact amounts and a plain numeric rendering. How an
//! amount is shown to people (grouping, currency symbol, decimal mark) is
//! decided by whoever implements this trait.

use crate::types::Amount;

/// Renders an amount for display
///
/// Implementations live in [`crate::format`]; output writers take a
/// `&dyn AmountFormatter` so the choice can be made at runtime.
pub trait AmountFormatter: Send + Sync {
    fn format(&self, amount: Amount) -> String;
}
