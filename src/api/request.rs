//! Request types for the Leave Engine API.
//!
//! This module defines the JSON request bodies and query strings accepted
//! by the API endpoints.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LeaveResult;
use crate::models::{
    DateRange, LeaveRecord, LeaveRequest, LeaveStatus, RequestFilter, ScopeFilter,
};

/// Request body for `POST /conflicts`.
///
/// Records are taken as the store holds them, dates as strings, so that a
/// malformed record can be reported without failing the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectConflictsRequest {
    /// The leave records to check. Only approved ones take part.
    pub intervals: Vec<LeaveRecord>,
}

/// Request body for `POST /validate` and `POST /requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestBody {
    /// The prospective leave.
    pub request: LeaveRequest,
    /// The date to judge futurity against. Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl LeaveRequestBody {
    /// The effective "today" for validation.
    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Request body for `POST /requests/:id/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
    /// The reviewer approving the request.
    pub reviewer_id: String,
}

/// Request body for `POST /requests/:id/reject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    /// The reviewer rejecting the request.
    pub reviewer_id: String,
    /// Why the request was rejected.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for `POST /requests/:id/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    /// The requester withdrawing their own request.
    pub requester_id: String,
}

/// Query string for `GET /calendar/:year/:month`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    /// Restrict the calendar to one owner's leave.
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl CalendarQuery {
    /// The visibility scope the query asks for.
    pub fn scope(&self) -> ScopeFilter {
        ScopeFilter::from_owner(self.owner_id.clone())
    }
}

/// Query string for `GET /requests`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestListQuery {
    /// Only this owner's requests.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Only requests in this status.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
    /// Only requests starting on or after this date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Only requests starting on or before this date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl RequestListQuery {
    /// The store filter the query asks for.
    ///
    /// Fails when both bounds are given and `end_date` precedes `start_date`.
    pub fn filter(&self) -> LeaveResult<RequestFilter> {
        let starting = match (self.start_date, self.end_date) {
            (None, None) => None,
            (start, end) => Some(DateRange::new(
                start.unwrap_or(NaiveDate::MIN),
                end.unwrap_or(NaiveDate::MAX),
            )?),
        };
        Ok(RequestFilter {
            scope: ScopeFilter::from_owner(self.owner_id.clone()),
            status: self.status,
            starting,
        })
    }
}

/// Query string for `GET /dashboard/:owner_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    /// Count and list every owner's requests instead of only the user's.
    #[serde(default)]
    pub team: bool,
    /// The date "upcoming" is measured from. Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl DashboardQuery {
    /// The visibility scope for `owner_id`'s dashboard.
    pub fn scope(&self, owner_id: &str) -> ScopeFilter {
        if self.team {
            ScopeFilter::All
        } else {
            ScopeFilter::Owner(owner_id.to_string())
        }
    }

    /// The effective "today" for the dashboard.
    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Query string for `GET /users/:owner_id/notifications`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationsQuery {
    /// Leave out notifications already read.
    #[serde(default)]
    pub unread_only: bool,
}
