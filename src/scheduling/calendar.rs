//! Calendar views over leave and conflicts.
//!
//! This module provides the per-date lookups a calendar grid needs and the
//! monthly export a reviewer downloads.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{LeaveError, LeaveResult};
use crate::models::{ConflictRecord, DateRange, LeaveInterval, LeaveStatus};

use super::detect;

/// Returns the leave (in any status) covering `date`.
pub fn leaves_for_date(intervals: &[LeaveInterval], date: NaiveDate) -> Vec<&LeaveInterval> {
    intervals.iter().filter(|i| i.covers(date)).collect()
}

/// Returns the conflicts whose overlap window covers `date`.
pub fn conflicts_for_date(conflicts: &[ConflictRecord], date: NaiveDate) -> Vec<&ConflictRecord> {
    conflicts.iter().filter(|c| c.covers(date)).collect()
}

/// Returns the first and last day of a calendar month.
///
/// # Example
///
/// ```
/// use leave_engine::scheduling::month_range;
/// use chrono::NaiveDate;
///
/// let feb = month_range(2024, 2).unwrap();
/// assert_eq!(feb.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(feb.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(month_range(2024, 13).is_err());
/// ```
pub fn month_range(year: i32, month: u32) -> LeaveResult<DateRange> {
    let invalid = || LeaveError::InvalidMonth { year, month };

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;

    DateRange::new(start, end)
}

/// Summary counts for a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSummary {
    /// All leave overlapping the month.
    pub total_leaves: usize,
    /// Approved leave overlapping the month.
    pub approved_leaves: usize,
    /// Pending leave overlapping the month.
    pub pending_leaves: usize,
    /// Conflicts among the approved leave.
    pub total_conflicts: usize,
}

/// A month of leave with its conflicts, as exported for reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCalendar {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
    /// Leave overlapping the month.
    pub leaves: Vec<LeaveInterval>,
    /// Conflicts among the approved leave.
    pub conflicts: Vec<ConflictRecord>,
    /// Summary counts.
    pub summary: CalendarSummary,
}

impl MonthlyCalendar {
    /// Builds the calendar for a month from the leave overlapping it.
    ///
    /// Leave outside the month is dropped before counting.
    pub fn build(year: i32, month: u32, intervals: Vec<LeaveInterval>) -> LeaveResult<Self> {
        let range = month_range(year, month)?;
        let leaves: Vec<LeaveInterval> = intervals
            .into_iter()
            .filter(|i| range.intersects(i.start_date(), i.end_date()))
            .collect();

        let conflicts = detect(&leaves);
        let count = |status: LeaveStatus| leaves.iter().filter(|i| i.status() == status).count();

        let summary = CalendarSummary {
            total_leaves: leaves.len(),
            approved_leaves: count(LeaveStatus::Approved),
            pending_leaves: count(LeaveStatus::Pending),
            total_conflicts: conflicts.len(),
        };

        Ok(Self {
            year,
            month,
            leaves,
            conflicts,
            summary,
        })
    }

    /// Leave covering a day of this month.
    pub fn leaves_on(&self, date: NaiveDate) -> Vec<&LeaveInterval> {
        leaves_for_date(&self.leaves, date)
    }

    /// Conflicts covering a day of this month.
    pub fn conflicts_on(&self, date: NaiveDate) -> Vec<&ConflictRecord> {
        conflicts_for_date(&self.conflicts, date)
    }
}
