//! Leave interval model and related types.
//!
//! This module defines [`LeaveInterval`], the validated date span of a leave
//! request together with its category and lifecycle status, plus the
//! loosely-shaped [`LeaveRecord`] it is built from and the [`LeaveRequest`]
//! draft a requester submits.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LeaveError, LeaveResult};
use crate::models::ValidationFailure;
use crate::scheduling::inclusive_day_count;

/// The category of leave, each with its own entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    /// Annual vacation leave.
    Vacation,
    /// Sick leave.
    Sick,
    /// Personal leave.
    Personal,
    /// Maternity leave.
    Maternity,
    /// Emergency leave.
    Emergency,
}

impl LeaveCategory {
    /// Every category, in ledger order.
    pub const ALL: [LeaveCategory; 5] = [
        LeaveCategory::Vacation,
        LeaveCategory::Sick,
        LeaveCategory::Personal,
        LeaveCategory::Maternity,
        LeaveCategory::Emergency,
    ];
}

impl std::fmt::Display for LeaveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveCategory::Vacation => write!(f, "vacation"),
            LeaveCategory::Sick => write!(f, "sick"),
            LeaveCategory::Personal => write!(f, "personal"),
            LeaveCategory::Maternity => write!(f, "maternity"),
            LeaveCategory::Emergency => write!(f, "emergency"),
        }
    }
}

/// The lifecycle status of a leave interval.
///
/// Intervals start as [`LeaveStatus::Pending`] and move to exactly one
/// terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Approved by a reviewer. Only approved leave takes part in conflict detection.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Withdrawn by the requester before review.
    Cancelled,
}

impl LeaveStatus {
    /// Returns true for the statuses an interval can never leave.
    pub fn is_terminal(self) -> bool {
        self != LeaveStatus::Pending
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "pending"),
            LeaveStatus::Approved => write!(f, "approved"),
            LeaveStatus::Rejected => write!(f, "rejected"),
            LeaveStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Administrative metadata recorded with a status decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMetadata {
    /// The user who made the decision (reviewer or requester).
    pub actor_id: String,
    /// When the decision was made.
    pub at: DateTime<Utc>,
    /// Optional free-text reason, e.g. a rejection reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A leave record as held by the external store.
///
/// Dates are kept as strings because stored documents are not guaranteed to
/// be well formed. Converting into a [`LeaveInterval`] parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Unique identifier for the interval.
    pub id: String,
    /// The requester who owns the interval.
    pub owner_id: String,
    /// The leave category.
    pub category: LeaveCategory,
    /// First day of leave, expected as `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day of leave (inclusive), expected as `YYYY-MM-DD`.
    pub end_date: String,
    /// The lifecycle status.
    pub status: LeaveStatus,
    /// The requester's reason for the leave.
    #[serde(default)]
    pub reason: String,
    /// The latest status decision, if any.
    #[serde(default)]
    pub decision: Option<StatusMetadata>,
    /// When the request was submitted. Records without one sort as oldest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn parse_record_date(interval_id: &str, field: &str, value: &str) -> LeaveResult<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| LeaveError::DataError {
            interval_id: interval_id.to_string(),
            message: format!("unparsable {} '{}'", field, value),
        })
}

/// A leave request's validated date span plus status and category.
///
/// The `start_date <= end_date` invariant is enforced at construction, and
/// neither the dates nor the category can change afterwards. Deserialization
/// goes through [`LeaveRecord`], so the same checks apply to JSON input.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveCategory, LeaveInterval, LeaveStatus};
/// use chrono::NaiveDate;
///
/// let interval = LeaveInterval::new(
///     "req_001",
///     "emp_001",
///     LeaveCategory::Vacation,
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(interval.status(), LeaveStatus::Pending);
/// assert_eq!(interval.days(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LeaveRecord")]
pub struct LeaveInterval {
    id: String,
    owner_id: String,
    category: LeaveCategory,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: LeaveStatus,
    reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    decision: Option<StatusMetadata>,
    created_at: DateTime<Utc>,
}

impl LeaveInterval {
    /// Creates a new pending interval.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure::InvalidRange`] if `end_date` is before
    /// `start_date`.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        category: LeaveCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> LeaveResult<Self> {
        if end_date < start_date {
            return Err(ValidationFailure::InvalidRange {
                start_date,
                end_date,
            }
            .into());
        }

        Ok(Self {
            id: id.into(),
            owner_id: owner_id.into(),
            category,
            start_date,
            end_date,
            status: LeaveStatus::Pending,
            reason: String::new(),
            decision: None,
            created_at: Utc::now(),
        })
    }

    /// Creates a pending interval from a submitted request.
    pub fn from_request(id: impl Into<String>, request: &LeaveRequest) -> LeaveResult<Self> {
        Ok(Self::new(
            id,
            request.owner_id.clone(),
            request.category,
            request.start_date,
            request.end_date,
        )?
        .with_reason(request.reason.clone()))
    }

    /// Sets the submission time.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the requester's reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// The interval ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The owning requester's ID.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// The leave category.
    pub fn category(&self) -> LeaveCategory {
        self.category
    }

    /// First day of leave.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of leave (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The current lifecycle status.
    pub fn status(&self) -> LeaveStatus {
        self.status
    }

    /// The requester's reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The latest status decision, if any.
    pub fn decision(&self) -> Option<&StatusMetadata> {
        self.decision.as_ref()
    }

    /// When the request was submitted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the interval is approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Number of leave days, counting both ends.
    pub fn days(&self) -> u32 {
        // start <= end is a construction invariant, so the count is at least 1.
        inclusive_day_count(self.start_date, self.end_date) as u32
    }

    /// Returns true if `date` falls within the interval (inclusive).
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Moves a pending interval into a terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveError::InvalidTransition`] if the interval is already
    /// terminal or `to` is [`LeaveStatus::Pending`].
    pub fn transition(&mut self, to: LeaveStatus, metadata: StatusMetadata) -> LeaveResult<()> {
        if self.status.is_terminal() || !to.is_terminal() {
            return Err(LeaveError::InvalidTransition {
                interval_id: self.id.clone(),
                from: self.status,
                to,
            });
        }

        self.status = to;
        self.decision = Some(metadata);
        Ok(())
    }
}

impl TryFrom<LeaveRecord> for LeaveInterval {
    type Error = LeaveError;

    fn try_from(record: LeaveRecord) -> LeaveResult<Self> {
        let start_date = parse_record_date(&record.id, "start_date", &record.start_date)?;
        let end_date = parse_record_date(&record.id, "end_date", &record.end_date)?;

        if end_date < start_date {
            return Err(LeaveError::DataError {
                interval_id: record.id,
                message: format!("end_date {} is before start_date {}", end_date, start_date),
            });
        }

        Ok(Self {
            id: record.id,
            owner_id: record.owner_id,
            category: record.category,
            start_date,
            end_date,
            status: record.status,
            reason: record.reason,
            decision: record.decision,
            created_at: record.created_at.unwrap_or_default(),
        })
    }
}

impl From<LeaveInterval> for LeaveRecord {
    fn from(interval: LeaveInterval) -> Self {
        LeaveRecord {
            id: interval.id,
            owner_id: interval.owner_id,
            category: interval.category,
            start_date: interval.start_date.to_string(),
            end_date: interval.end_date.to_string(),
            status: interval.status,
            reason: interval.reason,
            decision: interval.decision,
            created_at: Some(interval.created_at),
        }
    }
}

/// A leave request as submitted, before validation.
///
/// Unlike [`LeaveInterval`], a request may carry reversed dates; the
/// validator is responsible for rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The requester.
    pub owner_id: String,
    /// The requested leave category.
    pub category: LeaveCategory,
    /// First requested day.
    pub start_date: NaiveDate,
    /// Last requested day (inclusive).
    pub end_date: NaiveDate,
    /// Optional reason.
    #[serde(default)]
    pub reason: String,
}

impl LeaveRequest {
    /// Number of requested days, counting both ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{LeaveCategory, LeaveRequest};
    /// use chrono::NaiveDate;
    ///
    /// let request = LeaveRequest {
    ///     owner_id: "emp_001".to_string(),
    ///     category: LeaveCategory::Vacation,
    ///     start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
    ///     reason: String::new(),
    /// };
    /// assert_eq!(request.requested_days(), 5);
    /// ```
    pub fn requested_days(&self) -> i64 {
        inclusive_day_count(self.start_date, self.end_date)
    }
}
