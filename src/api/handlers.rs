//! HTTP request handlers for the Leave Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::LeaveError;
use crate::scheduling::detect_records;

use super::request::{
    ApproveRequest, CalendarQuery, CancelRequest, DashboardQuery, DetectConflictsRequest,
    LeaveRequestBody, NotificationsQuery, RejectRequest, RequestListQuery,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/conflicts", post(detect_conflicts_handler))
        .route("/validate", post(validate_handler))
        .route("/requests", post(submit_handler).get(list_requests_handler))
        .route("/requests/:id/approve", post(approve_handler))
        .route("/requests/:id/reject", post(reject_handler))
        .route("/requests/:id/cancel", post(cancel_handler))
        .route("/balances/:owner_id", get(balance_handler))
        .route("/balances/:owner_id/reconcile", post(reconcile_handler))
        .route("/calendar/:year/:month", get(calendar_handler))
        .route("/dashboard/:owner_id", get(dashboard_handler))
        .route("/users/:owner_id/notifications", get(notifications_handler))
        .route(
            "/users/:owner_id/notifications/read",
            post(mark_all_notifications_read_handler),
        )
        .route("/notifications/:id/read", post(mark_notification_read_handler))
        .with_state(state)
}

/// Turns a JSON extraction failure into a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::missing_field(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

/// Turns a path extraction failure into a 400 response.
fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
    ApiErrorResponse::bad_request(ApiError::new("INVALID_PATH", body_text)).into_response()
}

/// Turns a query string extraction failure into a 400 response.
fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::new("INVALID_QUERY", body_text)).into_response()
}

fn failure(correlation_id: Uuid, err: LeaveError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: Result<T, LeaveError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for POST /conflicts.
///
/// Detects conflicts among the approved records in the body. Malformed
/// records are listed in the report rather than failing the request.
async fn detect_conflicts_handler(
    payload: Result<Json<DetectConflictsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let report = detect_records(&request.intervals);
    info!(
        correlation_id = %correlation_id,
        records = request.intervals.len(),
        conflicts = report.conflicts.len(),
        rejected = report.rejected.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Conflict detection completed"
    );

    (StatusCode::OK, Json(report)).into_response()
}

/// Handler for POST /validate.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        owner_id = %body.request.owner_id,
        "Validating leave request"
    );

    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.check(&body.request, body.today()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /requests.
async fn submit_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRequestBody>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        owner_id = %body.request.owner_id,
        category = %body.request.category,
        "Submitting leave request"
    );

    let today = body.today();
    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.submit(body.request, today));
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /requests/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, interval_id = %id, "Approving leave request");

    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.approve(&id, &body.reviewer_id, Utc::now()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /requests/:id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RejectRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, interval_id = %id, "Rejecting leave request");

    let result = state.workflow().and_then(|mut workflow| {
        workflow.reject(&id, &body.reviewer_id, body.reason, Utc::now())
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /requests/:id/cancel.
async fn cancel_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CancelRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Json(body) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, interval_id = %id, "Cancelling leave request");

    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.cancel(&id, &body.requester_id, Utc::now()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /balances/:owner_id.
async fn balance_handler(State(state): State<AppState>, Path(owner_id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, owner_id = %owner_id, "Fetching leave balance");

    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.balance(&owner_id));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /balances/:owner_id/reconcile.
async fn reconcile_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, owner_id = %owner_id, "Reconciling leave balance");

    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.reconcile(&owner_id));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /calendar/:year/:month.
async fn calendar_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Path((year, month)) = match path {
        Ok(path) => path,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, year, month, "Building leave calendar");

    let result = state
        .workflow()
        .and_then(|workflow| workflow.calendar(year, month, &query.scope()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /requests.
///
/// Lists requests newest first, filtered by owner, status and start date.
async fn list_requests_handler(
    State(state): State<AppState>,
    query: Result<Query<RequestListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        owner_id = ?query.owner_id,
        status = ?query.status,
        "Listing leave requests"
    );

    let result = query
        .filter()
        .and_then(|filter| state.workflow()?.requests(&filter));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /dashboard/:owner_id.
async fn dashboard_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        owner_id = %owner_id,
        team = query.team,
        "Building dashboard"
    );

    let scope = query.scope(&owner_id);
    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.dashboard(&owner_id, &scope, query.today()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /users/:owner_id/notifications.
async fn notifications_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    query: Result<Query<NotificationsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    info!(correlation_id = %correlation_id, owner_id = %owner_id, "Fetching notifications");

    let result = state
        .workflow()
        .and_then(|workflow| workflow.notifications(&owner_id, query.unread_only));
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /notifications/:id/read.
async fn mark_notification_read_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, notification_id = %id, "Marking notification read");

    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.mark_notification_read(&id, Utc::now()));
    respond(correlation_id, StatusCode::OK, result)
}

/// Response body for `POST /users/:owner_id/notifications/read`.
#[derive(Debug, Serialize)]
struct MarkedRead {
    marked: usize,
}

/// Handler for POST /users/:owner_id/notifications/read.
async fn mark_all_notifications_read_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, owner_id = %owner_id, "Marking notifications read");

    let result = state
        .workflow()
        .and_then(|mut workflow| workflow.mark_all_notifications_read(&owner_id, Utc::now()))
        .map(|marked| MarkedRead { marked });
    respond(correlation_id, StatusCode::OK, result)
}
