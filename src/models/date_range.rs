//! Date range, scope and request filter types.
//!
//! These replace the ambient "current user" and "current month" state of a
//! UI session with explicit parameters passed to store queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LeaveResult;
use crate::models::{LeaveInterval, LeaveStatus, ValidationFailure};

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use leave_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let june = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
/// )
/// .unwrap();
///
/// assert!(june.contains(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
/// assert!(!june.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> LeaveResult<Self> {
        if end < start {
            return Err(ValidationFailure::InvalidRange {
                start_date: start,
                end_date: end,
            }
            .into());
        }
        Ok(Self { start, end })
    }

    /// A range covering every representable date.
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    /// Returns true if `date` falls within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if the closed span `[start, end]` shares at least one day
    /// with this range.
    pub fn intersects(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && self.start <= end
    }
}

/// Which owners' leave a query should see.
///
/// Reviewers query with [`ScopeFilter::All`]; employees only see their own
/// leave through [`ScopeFilter::Owner`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScopeFilter {
    /// Every owner.
    #[default]
    All,
    /// A single owner.
    Owner(String),
}

impl ScopeFilter {
    /// Builds a filter from an optional owner ID.
    pub fn from_owner(owner_id: Option<String>) -> Self {
        match owner_id {
            Some(id) => ScopeFilter::Owner(id),
            None => ScopeFilter::All,
        }
    }

    /// Returns true if leave owned by `owner_id` is visible under this filter.
    pub fn matches(&self, owner_id: &str) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::Owner(id) => id == owner_id,
        }
    }
}

/// Criteria for listing leave requests.
///
/// Every criterion left empty matches everything. `starting` selects
/// requests by start date only, so a request that begins before the range
/// and runs into it is not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// Whose requests to list.
    pub scope: ScopeFilter,
    /// Only requests in this status.
    pub status: Option<LeaveStatus>,
    /// Only requests starting within this range.
    pub starting: Option<DateRange>,
}

impl RequestFilter {
    /// A filter listing every request visible under `scope`.
    pub fn scoped(scope: ScopeFilter) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Restricts the filter to one status.
    pub fn with_status(mut self, status: LeaveStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if `interval` passes every criterion.
    pub fn matches(&self, interval: &LeaveInterval) -> bool {
        self.scope.matches(interval.owner_id())
            && self.status.is_none_or(|status| interval.status() == status)
            && self
                .starting
                .is_none_or(|range| range.contains(interval.start_date()))
    }
}
