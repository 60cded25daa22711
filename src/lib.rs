//! Club Fines Library
//! # Overview
//!
//! This library computes the amounts a sports club shows for its members'
//! fines: exact fixed-point money, fine reasons that either carry their own
//! data or refer to a reason template, and per-member sums by payment state
//! and severity.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Amount, FineReason, Fine, etc.)
//! - [`core`] - Aggregation:
//!   - [`core::aggregator`] - Category sums over a fine collection
//!   - [`core::summary`] - Per-member totals computed in one pass
//!   - `core::async` - Concurrent aggregation across members
//! - [`format`] - Numeric and currency display of amounts
//! - [`io`] - CSV input/output and template snapshot loading
//! - [`strategy`] - Sync and async processing pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Amounts
//!
//! An [`Amount`] is a whole number of units plus two decimal digits. It is
//! never negative: subtraction stops at zero and negative input is rejected
//! when decoding.
//!
//! ```
//! use club_fines::Amount;
//!
//! let fee = Amount::new(10, 50) + Amount::new(0, 60);
//! assert_eq!(fee, Amount::new(11, 10));
//! assert_eq!(fee.to_string(), "11.10");
//! assert_eq!(Amount::new(1, 0) - Amount::new(2, 0), Amount::ZERO);
//! ```
//!
//! # Resolving reasons
//!
//! Template references resolve against a snapshot handed in by the caller.
//! A missing snapshot or a deleted template yields an empty description, a
//! zero amount and low importance.
//!
//! ```
//! use club_fines::{Amount, FineReason, Importance, ReasonTemplate};
//!
//! let templates = vec![ReasonTemplate {
//!     id: "late".to_string(),
//!     description: "Late to training".to_string(),
//!     amount: Amount::new(5, 0),
//!     importance: Importance::High,
//! }];
//! let reason = FineReason::template("late");
//! assert_eq!(reason.resolve_amount(Some(templates.as_slice())), Amount::new(5, 0));
//! assert_eq!(reason.resolve_amount(None), Amount::ZERO);
//! ```

pub mod cli;
pub mod core;
pub mod format;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AmountFormatter, AmountSummary, FineAggregator};
pub use format::{CurrencyFormat, NumericFormat};
pub use io::write_summaries_csv;
pub use types::{
    Amount, Fine, FineError, FineId, FineReason, Importance, OwnerId, PaymentState,
    ReasonTemplate, TemplateId,
};
