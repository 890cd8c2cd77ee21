//! Integration tests for the Leave Engine HTTP API.
//!
//! This test suite drives the router end to end:
//! - Conflict detection over raw records
//! - Request validation and suggestions
//! - Submission, approval, rejection and cancellation
//! - Balances and reconciliation
//! - The monthly calendar
//! - Request listing, the dashboard and notifications
//! - Error status codes

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;

const AS_OF: &str = "2024-07-01";

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn leave_request(owner_id: &str, category: &str, start: &str, end: &str) -> Value {
    json!({
        "request": {
            "owner_id": owner_id,
            "category": category,
            "start_date": start,
            "end_date": end,
            "reason": "Integration test"
        },
        "as_of": AS_OF
    })
}

fn record(id: &str, owner_id: &str, start: &str, end: &str, status: &str) -> Value {
    json!({
        "id": id,
        "owner_id": owner_id,
        "category": "vacation",
        "start_date": start,
        "end_date": end,
        "status": status
    })
}

/// Submits a request and returns the new interval ID.
async fn submit(
    router: &Router,
    owner_id: &str,
    category: &str,
    start: &str,
    end: &str,
) -> String {
    let (status, body) = send(
        router,
        "POST",
        "/requests",
        Some(leave_request(owner_id, category, start, end)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "submission failed: {}", body);
    body["interval"]["id"].as_str().unwrap().to_string()
}

async fn approve(router: &Router, id: &str) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        &format!("/requests/{}/approve", id),
        Some(json!({"reviewer_id": "hr_001"})),
    )
    .await
}

// =============================================================================
// SECTION 1: Conflict Detection
// =============================================================================

#[tokio::test]
async fn test_conflicts_single_overlap() {
    let router = create_router_for_test();
    let body = json!({
        "intervals": [
            record("A", "emp_1", "2024-06-01", "2024-06-05", "approved"),
            record("B", "emp_2", "2024-06-03", "2024-06-08", "approved")
        ]
    });

    let (status, report) = send(&router, "POST", "/conflicts", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let conflicts = report["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["id"], "A-B");
    assert_eq!(conflicts[0]["overlap_start"], "2024-06-03");
    assert_eq!(conflicts[0]["overlap_end"], "2024-06-05");
}

#[tokio::test]
async fn test_conflicts_touching_on_a_single_day() {
    let router = create_router_for_test();
    let body = json!({
        "intervals": [
            record("A", "emp_1", "2024-06-01", "2024-06-05", "approved"),
            record("B", "emp_2", "2024-06-05", "2024-06-10", "approved")
        ]
    });

    let (_, report) = send(&router, "POST", "/conflicts", Some(body)).await;

    let conflicts = report["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["overlap_start"], "2024-06-05");
    assert_eq!(conflicts[0]["overlap_end"], "2024-06-05");
}

#[tokio::test]
async fn test_conflicts_ignore_pending_and_adjacent() {
    let router = create_router_for_test();
    let body = json!({
        "intervals": [
            record("A", "emp_1", "2024-06-01", "2024-06-05", "approved"),
            record("B", "emp_2", "2024-06-06", "2024-06-10", "approved"),
            record("C", "emp_3", "2024-06-01", "2024-06-10", "pending")
        ]
    });

    let (status, report) = send(&router, "POST", "/conflicts", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(report["conflicts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_conflicts_three_way_overlap() {
    let router = create_router_for_test();
    let body = json!({
        "intervals": [
            record("A", "emp_1", "2024-06-01", "2024-06-10", "approved"),
            record("B", "emp_2", "2024-06-03", "2024-06-06", "approved"),
            record("C", "emp_3", "2024-06-05", "2024-06-12", "approved")
        ]
    });

    let (_, report) = send(&router, "POST", "/conflicts", Some(body)).await;

    let ids: Vec<&str> = report["conflicts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&"A-B"));
    assert!(ids.contains(&"A-C"));
    assert!(ids.contains(&"B-C"));
}

#[tokio::test]
async fn test_conflicts_report_malformed_records() {
    let router = create_router_for_test();
    let body = json!({
        "intervals": [
            record("A", "emp_1", "2024-06-01", "2024-06-05", "approved"),
            record("bad", "emp_2", "06/03/2024", "2024-06-08", "approved")
        ]
    });

    let (status, report) = send(&router, "POST", "/conflicts", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(report["conflicts"].as_array().unwrap().is_empty());
    let rejected = report["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["interval_id"], "bad");
}

// =============================================================================
// SECTION 2: Validation
// =============================================================================

#[tokio::test]
async fn test_validate_passes_without_conflicts() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/validate",
        Some(leave_request("emp_001", "vacation", "2024-08-01", "2024-08-05")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation"]["valid"], true);
    assert_eq!(body["validation"]["requested_days"], 5);
    assert!(body["suggestions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validate_reports_reversed_dates() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/validate",
        Some(leave_request("emp_001", "vacation", "2024-08-05", "2024-08-01")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation"]["valid"], false);
    assert_eq!(body["validation"]["failure"]["kind"], "invalid_range");
}

#[tokio::test]
async fn test_validate_insufficient_balance_message() {
    let router = create_router_for_test();

    let (_, body) = send(
        &router,
        "POST",
        "/validate",
        Some(leave_request("emp_001", "emergency", "2024-08-01", "2024-08-04")),
    )
    .await;

    assert_eq!(body["validation"]["valid"], false);
    assert_eq!(
        body["validation"]["reason"],
        "Insufficient emergency balance. Available: 3 days, requested: 4"
    );
}

#[tokio::test]
async fn test_validate_suggests_alternatives_on_conflict() {
    let router = create_router_for_test();
    let existing = submit(&router, "emp_002", "vacation", "2024-08-10", "2024-08-12").await;
    approve(&router, &existing).await;

    let (status, body) = send(
        &router,
        "POST",
        "/validate",
        Some(leave_request("emp_001", "vacation", "2024-08-11", "2024-08-13")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["validation"]["valid"], true);
    assert_eq!(body["validation"]["conflicts"].as_array().unwrap().len(), 1);

    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["start_date"], "2024-08-18");
    assert_eq!(suggestions[0]["end_date"], "2024-08-20");
    assert_eq!(suggestions[1]["start_date"], "2024-08-25");
    assert_eq!(suggestions[1]["end_date"], "2024-08-27");
}

// =============================================================================
// SECTION 3: Submission and Review
// =============================================================================

#[tokio::test]
async fn test_submit_past_request_returns_422() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/requests",
        Some(leave_request("emp_001", "vacation", "2024-07-01", "2024-07-02")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NOT_FUTURE");
}

#[tokio::test]
async fn test_submit_over_balance_returns_422() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/requests",
        Some(leave_request("emp_001", "personal", "2024-08-01", "2024-08-06")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INSUFFICIENT_BALANCE");
}

#[tokio::test]
async fn test_two_employees_same_window() {
    let router = create_router_for_test();
    let first = submit(&router, "emp_001", "vacation", "2024-08-10", "2024-08-12").await;
    let second = submit(&router, "emp_002", "personal", "2024-08-10", "2024-08-12").await;

    let (status, _) = approve(&router, &first).await;
    assert_eq!(status, StatusCode::OK);
    let (status, outcome) = approve(&router, &second).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["interval"]["status"], "approved");
    assert_eq!(outcome["conflicts"].as_array().unwrap().len(), 1);

    let (_, calendar) = send(&router, "GET", "/calendar/2024/8", None).await;
    assert_eq!(calendar["summary"]["approved_leaves"], 2);
    assert_eq!(calendar["summary"]["total_conflicts"], 1);
    assert_eq!(calendar["conflicts"][0]["overlap_start"], "2024-08-10");
    assert_eq!(calendar["conflicts"][0]["overlap_end"], "2024-08-12");

    let (_, balance) = send(&router, "GET", "/balances/emp_001", None).await;
    assert_eq!(balance["used"]["vacation"], 3);
    let (_, balance) = send(&router, "GET", "/balances/emp_002", None).await;
    assert_eq!(balance["used"]["personal"], 3);
    assert_eq!(balance["entitlement"]["personal"], 5);
}

#[tokio::test]
async fn test_double_approval_returns_409() {
    let router = create_router_for_test();
    let id = submit(&router, "emp_001", "sick", "2024-08-01", "2024-08-02").await;

    approve(&router, &id).await;
    let (status, body) = approve(&router, &id).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    let (_, balance) = send(&router, "GET", "/balances/emp_001", None).await;
    assert_eq!(balance["used"]["sick"], 2);
}

#[tokio::test]
async fn test_reject_keeps_balance() {
    let router = create_router_for_test();
    let id = submit(&router, "emp_001", "vacation", "2024-08-01", "2024-08-05").await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/requests/{}/reject", id),
        Some(json!({"reviewer_id": "hr_001", "reason": "Peak season"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["decision"]["reason"], "Peak season");

    let (_, balance) = send(&router, "GET", "/balances/emp_001", None).await;
    assert_eq!(balance["used"]["vacation"], 0);
}

#[tokio::test]
async fn test_cancel_by_other_user_returns_409() {
    let router = create_router_for_test();
    let id = submit(&router, "emp_001", "vacation", "2024-08-01", "2024-08-05").await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/requests/{}/cancel", id),
        Some(json!({"requester_id": "emp_002"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_OWNER");
}

#[tokio::test]
async fn test_cancelled_request_cannot_be_approved() {
    let router = create_router_for_test();
    let id = submit(&router, "emp_001", "vacation", "2024-08-01", "2024-08-05").await;

    let (status, body) = send(
        &router,
        "POST",
        &format!("/requests/{}/cancel", id),
        Some(json!({"requester_id": "emp_001"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, _) = approve(&router, &id).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// =============================================================================
// SECTION 4: Balances, Reconciliation and Calendar
// =============================================================================

#[tokio::test]
async fn test_new_owner_gets_policy_entitlement() {
    let router = create_router_for_test();

    let (status, balance) = send(&router, "GET", "/balances/emp_new", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["owner_id"], "emp_new");
    assert_eq!(balance["entitlement"]["vacation"], 25);
    assert_eq!(balance["entitlement"]["maternity"], 90);
    assert_eq!(balance["used"]["vacation"], 0);
}

#[tokio::test]
async fn test_reconcile_after_normal_approval_is_clean() {
    let router = create_router_for_test();
    let id = submit(&router, "emp_001", "vacation", "2024-08-01", "2024-08-05").await;
    approve(&router, &id).await;

    let (status, report) = send(&router, "POST", "/balances/emp_001/reconcile", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(report["repaired"].as_array().unwrap().is_empty());
    assert!(report["orphaned"].as_array().unwrap().is_empty());
    assert_eq!(report["balance"]["used"]["vacation"], 5);
}

#[tokio::test]
async fn test_calendar_scoped_to_owner() {
    let router = create_router_for_test();
    submit(&router, "emp_001", "vacation", "2024-08-01", "2024-08-05").await;
    submit(&router, "emp_002", "vacation", "2024-08-03", "2024-08-04").await;

    let (status, calendar) = send(&router, "GET", "/calendar/2024/8?owner_id=emp_002", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calendar["summary"]["total_leaves"], 1);
    assert_eq!(calendar["summary"]["pending_leaves"], 1);
    assert_eq!(calendar["leaves"][0]["owner_id"], "emp_002");
}

#[tokio::test]
async fn test_calendar_invalid_month_returns_400() {
    let router = create_router_for_test();

    let (status, body) = send(&router, "GET", "/calendar/2024/13", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_MONTH");
}

// =============================================================================
// SECTION 5: Listing, Dashboard and Notifications
// =============================================================================

fn ids(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_requests_filters_by_owner_and_status() {
    let router = create_router_for_test();
    let first = submit(&router, "emp_001", "vacation", "2024-08-01", "2024-08-02").await;
    let second = submit(&router, "emp_001", "vacation", "2024-09-01", "2024-09-02").await;
    let other = submit(&router, "emp_002", "sick", "2024-08-05", "2024-08-05").await;
    approve(&router, &first).await;

    let (status, all) = send(&router, "GET", "/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    let all_ids = ids(&all);
    assert_eq!(all_ids.len(), 3);
    assert!(all_ids.contains(&other.as_str()));

    let (status, pending) = send(
        &router,
        "GET",
        "/requests?owner_id=emp_001&status=pending",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&pending), vec![second.as_str()]);
    assert!(pending[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_list_requests_by_start_date() {
    let router = create_router_for_test();
    submit(&router, "emp_001", "vacation", "2024-07-30", "2024-08-02").await;
    let august = submit(&router, "emp_001", "vacation", "2024-08-10", "2024-08-12").await;

    let (status, listed) = send(
        &router,
        "GET",
        "/requests?start_date=2024-08-01&end_date=2024-08-31",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&listed), vec![august.as_str()]);
}

#[tokio::test]
async fn test_list_requests_with_reversed_dates_returns_422() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "GET",
        "/requests?start_date=2024-08-31&end_date=2024-08-01",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_RANGE");
}

#[tokio::test]
async fn test_dashboard_summarises_own_leave() {
    let router = create_router_for_test();
    let trip = submit(&router, "emp_001", "vacation", "2024-08-10", "2024-08-12").await;
    approve(&router, &trip).await;
    submit(&router, "emp_001", "personal", "2024-09-02", "2024-09-02").await;
    submit(&router, "emp_002", "vacation", "2024-08-20", "2024-08-21").await;

    let (status, dashboard) = send(
        &router,
        "GET",
        &format!("/dashboard/emp_001?as_of={}", AS_OF),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["available_vacation"], 22);
    assert_eq!(dashboard["total_used"], 3);
    assert_eq!(dashboard["pending_requests"], 1);
    assert!(dashboard.get("team_requests").is_none());
    assert_eq!(dashboard["recent"].as_array().unwrap().len(), 2);
    assert_eq!(ids(&dashboard["upcoming"]), vec![trip.as_str()]);
}

#[tokio::test]
async fn test_team_dashboard_counts_all_requests() {
    let router = create_router_for_test();
    submit(&router, "emp_001", "vacation", "2024-08-10", "2024-08-12").await;
    submit(&router, "emp_002", "vacation", "2024-08-20", "2024-08-21").await;

    let (status, dashboard) = send(
        &router,
        "GET",
        &format!("/dashboard/hr_001?team=true&as_of={}", AS_OF),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["team_requests"], 2);
    assert_eq!(dashboard["pending_requests"], 2);
}

#[tokio::test]
async fn test_notifications_can_be_listed_and_read() {
    let router = create_router_for_test();
    let id = submit(&router, "emp_001", "vacation", "2024-08-10", "2024-08-12").await;
    approve(&router, &id).await;

    let (status, inbox) = send(
        &router,
        "GET",
        "/users/emp_001/notifications?unread_only=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["read"], false);

    let notification_id = inbox[0]["id"].as_str().unwrap();
    let (status, read) = send(
        &router,
        "POST",
        &format!("/notifications/{}/read", notification_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["read"], true);
    assert!(read["read_at"].is_string());

    let (_, inbox) = send(
        &router,
        "GET",
        "/users/emp_001/notifications?unread_only=true",
        None,
    )
    .await;
    assert!(inbox.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_reviewer_marks_all_notifications_read() {
    let router = create_router_for_test();
    submit(&router, "emp_001", "vacation", "2024-08-10", "2024-08-12").await;
    submit(&router, "emp_002", "vacation", "2024-08-20", "2024-08-21").await;

    let (status, body) = send(&router, "POST", "/users/hr/notifications/read", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["marked"], 2);

    let (_, inbox) = send(&router, "GET", "/users/hr/notifications", None).await;
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 2);
    assert!(inbox.iter().all(|n| n["read"] == true));
}

// =============================================================================
// SECTION 6: Request Errors
// =============================================================================

#[tokio::test]
async fn test_non_numeric_calendar_year_returns_json_400() {
    let router = create_router_for_test();

    let (status, body) = send(&router, "GET", "/calendar/abc/8", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PATH");
}

#[tokio::test]
async fn test_unknown_category_returns_400() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/requests",
        Some(leave_request("emp_001", "sabbatical", "2024-08-01", "2024-08-05")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_interval_returns_404() {
    let router = create_router_for_test();

    let (status, body) = send(
        &router,
        "POST",
        "/requests/missing/reject",
        Some(json!({"reviewer_id": "hr_001"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "INTERVAL_NOT_FOUND");
}
