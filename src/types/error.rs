//! Error types for club fine tracking
//!
//! Only two kinds are raised by the value types themselves, both at the
//! decode boundary:
//!
//! - **NegativeAmount**: a scalar (or text) amount below zero
//! - **MalformedFineReason**: a fine reason payload with neither a template id
//!   nor a complete inline reason
//!
//! Arithmetic, comparison, resolution and aggregation never fail. The
//! remaining variants belong to the file and CSV layer around the core.

use thiserror::Error;

/// Main error type for the fines crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FineError {
    /// A decoded amount was negative
    ///
    /// Amounts have no negative representation, so this is rejected at the
    /// boundary instead of being clamped.
    #[error("Amount is negative: {amount}")]
    NegativeAmount {
        /// The rejected input as it was received
        amount: String,
    },

    /// A fine reason payload carried neither a template id nor the complete
    /// description / amount / importance triple
    ///
    /// This indicates upstream data corruption, not a missing template.
    #[error("Fine reason has no template id and no complete custom reason")]
    MalformedFineReason,

    /// Amount text that is not a number
    #[error("Invalid amount '{input}'")]
    InvalidAmount {
        /// The text that failed to parse
        input: String,
    },

    /// Importance text other than high, medium or low
    #[error("Invalid importance '{input}'")]
    InvalidImportance {
        /// The text that failed to parse
        input: String,
    },

    /// Payment state text other than paid, unpaid or settled
    #[error("Invalid payment state '{input}'")]
    InvalidPaymentState {
        /// The text that failed to parse
        input: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV or JSON parsing error
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for FineError {
    fn from(error: std::io::Error) -> Self {
        FineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for FineError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FineError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for FineError {
    fn from(error: serde_json::Error) -> Self {
        FineError::ParseError {
            line: Some(error.line() as u64),
            message: error.to_string(),
        }
    }
}

impl FineError {
    /// Create a NegativeAmount error
    pub fn negative_amount(amount: impl ToString) -> Self {
        FineError::NegativeAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        FineError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create an InvalidImportance error
    pub fn invalid_importance(input: &str) -> Self {
        FineError::InvalidImportance {
            input: input.to_string(),
        }
    }

    /// Create an InvalidPaymentState error
    pub fn invalid_payment_state(input: &str) -> Self {
        FineError::InvalidPaymentState {
            input: input.to_string(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        FineError::FileNotFound {
            path: path.to_string(),
        }
    }
}
