//! CSV format handling for fine records and summary output
//!
//! This module centralizes all CSV format concerns, providing:
//! - FineCsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Owner summary output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Input columns
//!
//! ```text
//! id,owner,template_id,description,amount,importance,count,state
//! f1,alice,late,,,,2,unpaid
//! f2,bob,,Forgot kit,2.50,medium,1,paid
//! ```
//!
//! A row with a `template_id` is a template reference and its inline columns
//! are ignored. Otherwise `description`, `amount` and `importance` must all
//! be present. `count` defaults to 1 and `state` to `unpaid`.

use crate::core::traits::AmountFormatter;
use crate::core::AmountSummary;
use crate::types::{Amount, Fine, FineId, FineReason, Importance, OwnerId, PaymentState};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Every column but `id` and `owner` is optional; blank cells count as
/// missing.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct FineCsvRecord {
    pub id: FineId,
    pub owner: OwnerId,
    pub template_id: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
    pub importance: Option<String>,
    pub count: Option<u32>,
    pub state: Option<String>,
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Convert a FineCsvRecord to a Fine
///
/// This function:
/// - Parses the amount, importance and state columns
/// - Builds the fine reason from template id or inline columns
/// - Applies the defaults for `count` and `state`
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(Fine) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_fine_record(csv_record: FineCsvRecord) -> Result<Fine, String> {
    let FineCsvRecord {
        id,
        owner,
        template_id,
        description,
        amount,
        importance,
        count,
        state,
    } = csv_record;

    let template_id = non_blank(template_id);

    // Inline columns of a template reference are not validated
    let (amount, importance) = if template_id.is_some() {
        (None, None)
    } else {
        let amount = non_blank(amount)
            .map(|text| text.parse::<Amount>())
            .transpose()
            .map_err(|e| format!("{} for fine {}", e, id))?;
        let importance = non_blank(importance)
            .map(|text| text.parse::<Importance>())
            .transpose()
            .map_err(|e| format!("{} for fine {}", e, id))?;
        (amount, importance)
    };

    let reason = FineReason::from_parts(template_id, non_blank(description), amount, importance)
        .map_err(|e| format!("{} for fine {}", e, id))?;

    let payment_state = match non_blank(state) {
        Some(text) => text
            .parse::<PaymentState>()
            .map_err(|e| format!("{} for fine {}", e, id))?,
        None => PaymentState::default(),
    };

    Ok(Fine::new(id, owner, reason, count.unwrap_or(1), payment_state))
}

/// Write owner summaries to CSV format
///
/// Writes one row per owner with columns:
/// owner, paid, unpaid, medium_or_high_unpaid, high_unpaid, total.
/// Rows follow the map order, which is sorted by owner id.
///
/// # Arguments
///
/// * `summaries` - Summaries keyed by owner id
/// * `formatter` - Renders each amount cell
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_summaries_csv(
    summaries: &BTreeMap<OwnerId, AmountSummary>,
    formatter: &dyn AmountFormatter,
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "owner",
            "paid",
            "unpaid",
            "medium_or_high_unpaid",
            "high_unpaid",
            "total",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for (owner, summary) in summaries {
        writer
            .write_record(&[
                owner.clone(),
                formatter.format(summary.paid),
                formatter.format(summary.unpaid),
                formatter.format(summary.medium_or_high_unpaid),
                formatter.format(summary.high_unpaid),
                formatter.format(summary.total),
            ])
            .map_err(|e| format!("Failed to write summary record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
