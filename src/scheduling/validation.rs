//! Leave request validation.
//!
//! A request is checked, in order, for date ordering, futurity and balance
//! sufficiency. The first failing check decides the result.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    BalanceRecord, LeaveInterval, LeaveRequest, ValidationFailure, ValidationResult,
};

use super::find_candidate_conflicts;

/// ID given to the not-yet-persisted candidate when computing conflicts.
pub const CANDIDATE_INTERVAL_ID: &str = "candidate";

/// Validates a prospective leave request.
///
/// # Checks
///
/// 1. `end_date >= start_date`, else [`ValidationFailure::InvalidRange`]
/// 2. `start_date > today` (date only), else [`ValidationFailure::NotFuture`]
/// 3. requested days `<=` available days in the category, else
///    [`ValidationFailure::InsufficientBalance`] reporting what is available
///
/// A passing result also lists conflicts with `existing_approved` leave of
/// other owners. They do not affect validity.
///
/// # Example
///
/// ```
/// use leave_engine::models::{BalanceRecord, LeaveCategory, LeaveRequest, ValidationFailure};
/// use leave_engine::scheduling::validate;
/// use chrono::NaiveDate;
/// use std::collections::BTreeMap;
///
/// let mut balance = BalanceRecord::new("emp_001", BTreeMap::from([(LeaveCategory::Sick, 10)]));
/// balance.apply_usage(LeaveCategory::Sick, 8);
///
/// let request = LeaveRequest {
///     owner_id: "emp_001".to_string(),
///     category: LeaveCategory::Sick,
///     start_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
///     reason: String::new(),
/// };
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
///
/// let result = validate(&request, &balance, &[], today);
/// assert!(!result.valid);
/// assert_eq!(
///     result.failure,
///     Some(ValidationFailure::InsufficientBalance {
///         category: LeaveCategory::Sick,
///         requested: 3,
///         available: 2,
///     })
/// );
/// ```
pub fn validate(
    request: &LeaveRequest,
    balance: &BalanceRecord,
    existing_approved: &[LeaveInterval],
    today: NaiveDate,
) -> ValidationResult {
    let requested_days = request.requested_days();

    if request.end_date < request.start_date {
        return ValidationResult::failed(
            ValidationFailure::InvalidRange {
                start_date: request.start_date,
                end_date: request.end_date,
            },
            requested_days,
        );
    }

    if request.start_date <= today {
        return ValidationResult::failed(
            ValidationFailure::NotFuture {
                start_date: request.start_date,
                today,
            },
            requested_days,
        );
    }

    let available = balance.available(request.category);
    if requested_days > available {
        return ValidationResult::failed(
            ValidationFailure::InsufficientBalance {
                category: request.category,
                requested: requested_days,
                available,
            },
            requested_days,
        );
    }

    let conflicts = match LeaveInterval::from_request(CANDIDATE_INTERVAL_ID, request) {
        Ok(candidate) => find_candidate_conflicts(&candidate, existing_approved),
        // Unreachable after the ordering check above.
        Err(_) => Vec::new(),
    };

    debug!(
        owner_id = %request.owner_id,
        category = %request.category,
        requested_days,
        available,
        conflicts = conflicts.len(),
        "Leave request passed validation"
    );

    ValidationResult::passed(requested_days, conflicts)
}
