//! Conflict record models.
//!
//! A [`ConflictRecord`] is derived state: it is recomputed from the current
//! set of approved intervals and never stored on its own.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LeaveInterval;
use crate::scheduling::inclusive_day_count;

/// An overlap between two approved leave intervals.
///
/// The `id` is the canonical key of the unordered pair (the two interval IDs
/// in lexical order joined by `-`), so the same pair yields the same record
/// whatever order the intervals were compared in. A `-` or `\` inside an
/// interval ID is escaped with `\`, so distinct pairs never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// Canonical pair key.
    pub id: String,
    /// The interval whose ID sorts first.
    pub interval_a: LeaveInterval,
    /// The interval whose ID sorts second.
    pub interval_b: LeaveInterval,
    /// First day both intervals cover.
    pub overlap_start: NaiveDate,
    /// Last day both intervals cover.
    pub overlap_end: NaiveDate,
}

fn escape_key_part(id: &str) -> Cow<'_, str> {
    if id.contains(['-', '\\']) {
        Cow::Owned(id.replace('\\', "\\\\").replace('-', "\\-"))
    } else {
        Cow::Borrowed(id)
    }
}

impl ConflictRecord {
    /// Builds the canonical pair key for two interval IDs.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::ConflictRecord;
    ///
    /// assert_eq!(ConflictRecord::pair_key("req_b", "req_a"), "req_a-req_b");
    /// assert_eq!(ConflictRecord::pair_key("req_a", "req_b"), "req_a-req_b");
    /// assert_eq!(ConflictRecord::pair_key("a-b", "c"), r"a\-b-c");
    /// ```
    pub fn pair_key(first: &str, second: &str) -> String {
        let (low, high) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        format!("{}-{}", escape_key_part(low), escape_key_part(high))
    }

    /// Returns true if `date` falls inside the overlap window.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.overlap_start && date <= self.overlap_end
    }

    /// Number of days both intervals share.
    pub fn overlap_days(&self) -> i64 {
        inclusive_day_count(self.overlap_start, self.overlap_end)
    }

    /// Returns true if either side of the conflict is the given interval.
    pub fn involves(&self, interval_id: &str) -> bool {
        self.interval_a.id() == interval_id || self.interval_b.id() == interval_id
    }
}

/// A stored record excluded from detection because its data was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// The ID of the offending record.
    pub interval_id: String,
    /// Why the record could not be used.
    pub message: String,
}

/// The outcome of running conflict detection over raw store records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Conflicts among the well-formed approved records.
    pub conflicts: Vec<ConflictRecord>,
    /// Approved records skipped because of malformed dates.
    pub rejected: Vec<RejectedRecord>,
}
