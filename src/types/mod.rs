//! Types module
//!
//! Contains the value types the rest of the crate computes with:
//! - `amount`: Fixed-point currency amount
//! - `fine_reason`: Fine reasons, importance tiers and reason templates
//! - `fine`: Fines and their payment state
//! - `error`: Error types for the crate

pub mod amount;
pub mod error;
pub mod fine;
pub mod fine_reason;

pub use amount::Amount;
pub use error::FineError;
pub use fine::{Fine, FineId, OwnerId, PaymentState};
pub use fine_reason::{FineReason, FineReasonPayload, Importance, ReasonTemplate, TemplateId};
