//! Conflict detection between approved leave intervals.
//!
//! Leave intervals are closed date ranges: two intervals overlap when
//! `a.start <= b.end && b.start <= a.end`. A leave ending on the day another
//! one starts IS a conflict, because both employees are away that day.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::models::{
    ConflictRecord, DetectionReport, LeaveInterval, LeaveRecord, LeaveStatus, RejectedRecord,
};

/// Returns true if two intervals share at least one day.
///
/// The check is symmetric and inclusive of boundary days.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveCategory, LeaveInterval};
/// use leave_engine::scheduling::overlaps;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
/// let a = LeaveInterval::new("a", "emp_1", LeaveCategory::Vacation, d(1), d(5)).unwrap();
/// let b = LeaveInterval::new("b", "emp_2", LeaveCategory::Vacation, d(5), d(10)).unwrap();
/// let c = LeaveInterval::new("c", "emp_3", LeaveCategory::Vacation, d(6), d(10)).unwrap();
///
/// assert!(overlaps(&a, &b));
/// assert!(!overlaps(&a, &c));
/// ```
pub fn overlaps(a: &LeaveInterval, b: &LeaveInterval) -> bool {
    a.start_date() <= b.end_date() && b.start_date() <= a.end_date()
}

/// Returns the days shared by two intervals as `(start, end)`, or `None`
/// when they do not overlap.
pub fn overlap_window(a: &LeaveInterval, b: &LeaveInterval) -> Option<(NaiveDate, NaiveDate)> {
    if !overlaps(a, b) {
        return None;
    }
    Some((
        a.start_date().max(b.start_date()),
        a.end_date().min(b.end_date()),
    ))
}

/// Builds the conflict record for a pair, ordering the sides by ID.
fn conflict_between(a: &LeaveInterval, b: &LeaveInterval) -> Option<ConflictRecord> {
    let (overlap_start, overlap_end) = overlap_window(a, b)?;
    let (first, second) = if a.id() <= b.id() { (a, b) } else { (b, a) };

    Some(ConflictRecord {
        id: ConflictRecord::pair_key(first.id(), second.id()),
        interval_a: first.clone(),
        interval_b: second.clone(),
        overlap_start,
        overlap_end,
    })
}

/// Finds every pairwise overlap among the approved intervals.
///
/// Intervals in any other status are ignored. Each unordered pair of
/// distinct interval IDs is reported at most once, even if the input
/// contains the same interval twice. Output order is unspecified.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveCategory, LeaveRecord, LeaveStatus, LeaveInterval};
/// use leave_engine::scheduling::detect;
///
/// let approved = |id: &str, owner: &str| {
///     LeaveInterval::try_from(LeaveRecord {
///         id: id.to_string(),
///         owner_id: owner.to_string(),
///         category: LeaveCategory::Vacation,
///         start_date: "2024-08-10".to_string(),
///         end_date: "2024-08-12".to_string(),
///         status: LeaveStatus::Approved,
///         reason: String::new(),
///         decision: None,
///         created_at: None,
///     })
///     .unwrap()
/// };
///
/// let conflicts = detect(&[approved("req_1", "emp_1"), approved("req_2", "emp_2")]);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].overlap_days(), 3);
/// ```
pub fn detect(intervals: &[LeaveInterval]) -> Vec<ConflictRecord> {
    let approved: Vec<&LeaveInterval> = intervals.iter().filter(|i| i.is_approved()).collect();

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut conflicts = Vec::new();

    for (index, a) in approved.iter().enumerate() {
        for b in &approved[index + 1..] {
            if a.id() == b.id() {
                continue;
            }

            let pair = if a.id() <= b.id() {
                (a.id(), b.id())
            } else {
                (b.id(), a.id())
            };
            if seen.contains(&pair) {
                continue;
            }

            if let Some(conflict) = conflict_between(a, b) {
                seen.insert(pair);
                conflicts.push(conflict);
            }
        }
    }

    debug!(
        approved = approved.len(),
        conflicts = conflicts.len(),
        "Conflict detection completed"
    );
    conflicts
}

/// Runs conflict detection over raw store records.
///
/// Approved records whose dates cannot be parsed (or are reversed) are
/// reported in [`DetectionReport::rejected`] and left out; the remaining
/// records are still checked against each other.
pub fn detect_records(records: &[LeaveRecord]) -> DetectionReport {
    let mut intervals = Vec::new();
    let mut rejected = Vec::new();

    for record in records.iter().filter(|r| r.status == LeaveStatus::Approved) {
        match LeaveInterval::try_from(record.clone()) {
            Ok(interval) => intervals.push(interval),
            Err(err) => {
                warn!(interval_id = %record.id, error = %err, "Skipping malformed leave record");
                rejected.push(RejectedRecord {
                    interval_id: record.id.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    DetectionReport {
        conflicts: detect(&intervals),
        rejected,
    }
}

/// Finds conflicts between a prospective interval and existing approved
/// leave belonging to other owners.
///
/// The candidate's own status is not checked, so a pending request can be
/// tested before it is approved.
pub fn find_candidate_conflicts(
    candidate: &LeaveInterval,
    approved: &[LeaveInterval],
) -> Vec<ConflictRecord> {
    approved
        .iter()
        .filter(|existing| existing.is_approved())
        .filter(|existing| existing.id() != candidate.id())
        .filter(|existing| existing.owner_id() != candidate.owner_id())
        .filter_map(|existing| conflict_between(candidate, existing))
        .collect()
}
