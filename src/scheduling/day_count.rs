//! Inclusive day counting.

use chrono::NaiveDate;

/// Counts the days from `start` to `end`, including both ends.
///
/// A single-day span counts as 1. A reversed span yields zero or a negative
/// count; callers that need a positive count validate ordering first.
///
/// # Examples
///
/// ```
/// use leave_engine::scheduling::inclusive_day_count;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
/// assert_eq!(inclusive_day_count(start, end), 5);
/// assert_eq!(inclusive_day_count(start, start), 1);
/// ```
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
