//! Scheduling logic for the Leave Engine.
//!
//! This module contains the pure functions behind leave scheduling:
//! inclusive day counting, conflict detection between approved intervals,
//! request validation against dates and balance, alternative date
//! suggestions, and calendar views over leave and conflicts.

mod calendar;
mod conflict_detection;
mod day_count;
mod suggestions;
mod validation;

pub use calendar::{
    CalendarSummary, MonthlyCalendar, conflicts_for_date, leaves_for_date, month_range,
};
pub use conflict_detection::{
    detect, detect_records, find_candidate_conflicts, overlap_window, overlaps,
};
pub use day_count::inclusive_day_count;
pub use suggestions::{SUGGESTION_OFFSETS_DAYS, suggest_alternatives};
pub use validation::{CANDIDATE_INTERVAL_ID, validate};
