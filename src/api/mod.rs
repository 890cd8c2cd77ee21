//! HTTP API module for the Leave Engine.
//!
//! This module provides the REST API endpoints for conflict detection,
//! request validation, the approval workflow, balances, the monthly
//! calendar, request listings, the dashboard and notifications.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApproveRequest, CalendarQuery, CancelRequest, DashboardQuery, DetectConflictsRequest,
    LeaveRequestBody, NotificationsQuery, RejectRequest, RequestListQuery,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
