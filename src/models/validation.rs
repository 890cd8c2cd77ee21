//! Validation result models.
//!
//! This module contains the structured outcome of validating a leave
//! request: the failure kinds, the overall [`ValidationResult`], and the
//! alternative windows offered when a request conflicts with approved leave.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ConflictRecord, LeaveCategory};

/// Why a leave request failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    /// The end date precedes the start date.
    #[error("End date {end_date} is before start date {start_date}")]
    InvalidRange {
        /// The requested start date.
        start_date: NaiveDate,
        /// The requested end date.
        end_date: NaiveDate,
    },

    /// The request does not start after today.
    #[error("Start date {start_date} must be after {today}")]
    NotFuture {
        /// The requested start date.
        start_date: NaiveDate,
        /// The date the request was validated on.
        today: NaiveDate,
    },

    /// The category does not have enough days left.
    #[error("Insufficient {category} balance. Available: {available} days, requested: {requested}")]
    InsufficientBalance {
        /// The requested category.
        category: LeaveCategory,
        /// Days requested.
        requested: i64,
        /// Days still available in the category.
        available: i64,
    },
}

impl ValidationFailure {
    /// A stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::InvalidRange { .. } => "INVALID_RANGE",
            ValidationFailure::NotFuture { .. } => "NOT_FUTURE",
            ValidationFailure::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
        }
    }
}

/// The outcome of validating a leave request.
///
/// `conflicts` lists overlaps with other owners' approved leave. They are
/// a warning for the requester and never make a request invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether every check passed.
    pub valid: bool,
    /// Human-readable reason for the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The structured failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ValidationFailure>,
    /// Requested days, counting both ends.
    pub requested_days: i64,
    /// Conflicts with existing approved leave.
    #[serde(default)]
    pub conflicts: Vec<ConflictRecord>,
}

impl ValidationResult {
    /// A passing result.
    pub fn passed(requested_days: i64, conflicts: Vec<ConflictRecord>) -> Self {
        Self {
            valid: true,
            reason: None,
            failure: None,
            requested_days,
            conflicts,
        }
    }

    /// A failing result.
    pub fn failed(failure: ValidationFailure, requested_days: i64) -> Self {
        Self {
            valid: false,
            reason: Some(failure.to_string()),
            failure: Some(failure),
            requested_days,
            conflicts: Vec::new(),
        }
    }

    /// Converts into a `Result`, surfacing the failure as an error.
    pub fn into_result(self) -> Result<Self, ValidationFailure> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(self),
        }
    }
}

/// An alternative leave window offered when a request conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedWindow {
    /// Suggested first day.
    pub start_date: NaiveDate,
    /// Suggested last day (inclusive).
    pub end_date: NaiveDate,
    /// Headline shown to the requester.
    pub message: String,
    /// Why this window is offered.
    pub reason: String,
}
