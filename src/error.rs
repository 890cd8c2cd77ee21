//! Error types for the Leave Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating, approving and
//! reconciling leave.

use thiserror::Error;

use crate::models::{LeaveStatus, ValidationFailure};

/// The main error type for the Leave Engine.
///
/// Every failure is recoverable by the caller: re-prompting the requester,
/// re-reading the store, or running a reconciliation pass.
///
/// # Example
///
/// ```
/// use leave_engine::error::LeaveError;
///
/// let error = LeaveError::IntervalNotFound {
///     interval_id: "req_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Leave interval not found: req_001");
/// ```
#[derive(Debug, Error)]
pub enum LeaveError {
    /// A leave request failed one of the validator's checks.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// A stored record carried a date that could not be parsed.
    #[error("Malformed leave interval '{interval_id}': {message}")]
    DataError {
        /// The ID of the offending interval.
        interval_id: String,
        /// A description of what could not be parsed.
        message: String,
    },

    /// No interval with the given ID exists in the store.
    #[error("Leave interval not found: {interval_id}")]
    IntervalNotFound {
        /// The ID that was looked up.
        interval_id: String,
    },

    /// No notification with the given ID exists in the store.
    #[error("Notification not found: {notification_id}")]
    NotificationNotFound {
        /// The ID that was looked up.
        notification_id: String,
    },

    /// A status change was requested that the lifecycle does not allow.
    #[error("Cannot move leave interval '{interval_id}' from {from} to {to}")]
    InvalidTransition {
        /// The ID of the interval.
        interval_id: String,
        /// The interval's current status.
        from: LeaveStatus,
        /// The requested status.
        to: LeaveStatus,
    },

    /// The acting user does not own the interval.
    #[error("User '{actor_id}' does not own leave interval '{interval_id}'")]
    NotOwner {
        /// The ID of the interval.
        interval_id: String,
        /// The user who attempted the action.
        actor_id: String,
    },

    /// The interval was approved but its balance debit was not written.
    #[error("Leave interval '{interval_id}' approved but balance not updated: {message}")]
    PartialApproval {
        /// The ID of the approved interval.
        interval_id: String,
        /// The underlying store failure.
        message: String,
    },

    /// The backing store failed.
    #[error("Store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },

    /// A calendar month outside 1..=12 (or an unrepresentable year) was requested.
    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return LeaveError.
pub type LeaveResult<T> = Result<T, LeaveError>;
