//! Core data models for the Leave Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod conflict;
mod date_range;
mod leave;
mod validation;

pub use balance::BalanceRecord;
pub use conflict::{ConflictRecord, DetectionReport, RejectedRecord};
pub use date_range::{DateRange, RequestFilter, ScopeFilter};
pub use leave::{
    LeaveCategory, LeaveInterval, LeaveRecord, LeaveRequest, LeaveStatus, StatusMetadata,
};
pub use validation::{SuggestedWindow, ValidationFailure, ValidationResult};
