//! Alternative date suggestions for conflicting requests.
//!
//! Suggestions shift the requested window forward by whole weeks while
//! keeping its length. They are a nudge, not a search: the shifted windows
//! are not checked against approved leave, so a caller that accepts one
//! should validate it again.

use chrono::Days;

use crate::models::{ConflictRecord, LeaveRequest, SuggestedWindow};

/// Forward shifts, in days, applied to a conflicting request.
pub const SUGGESTION_OFFSETS_DAYS: [u64; 2] = [7, 14];

const SUGGESTION_TEXT: [(&str, &str); 2] = [
    (
        "Consider moving your leave to avoid conflicts",
        "Avoids team conflicts",
    ),
    (
        "Alternative option for better coverage",
        "Optimal team coverage",
    ),
];

/// Proposes alternative windows for a request that conflicts with approved
/// leave.
///
/// Returns nothing when `conflicts` is empty. Otherwise returns the request
/// shifted forward by 7 and by 14 days, each with the original duration.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveCategory, LeaveRequest};
/// use leave_engine::scheduling::suggest_alternatives;
/// use chrono::NaiveDate;
///
/// let request = LeaveRequest {
///     owner_id: "emp_001".to_string(),
///     category: LeaveCategory::Vacation,
///     start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 7, 3).unwrap(),
///     reason: String::new(),
/// };
///
/// assert!(suggest_alternatives(&request, &[]).is_empty());
/// ```
pub fn suggest_alternatives(
    request: &LeaveRequest,
    conflicts: &[ConflictRecord],
) -> Vec<SuggestedWindow> {
    if conflicts.is_empty() {
        return Vec::new();
    }

    let duration = request.end_date - request.start_date;

    SUGGESTION_OFFSETS_DAYS
        .iter()
        .zip(SUGGESTION_TEXT.iter())
        .filter_map(|(offset, (message, reason))| {
            let start_date = request.start_date.checked_add_days(Days::new(*offset))?;
            let end_date = start_date.checked_add_signed(duration)?;
            Some(SuggestedWindow {
                start_date,
                end_date,
                message: message.to_string(),
                reason: reason.to_string(),
            })
        })
        .collect()
}
