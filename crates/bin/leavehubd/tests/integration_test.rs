//! End-to-end smoke tests for the full leavehubd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use leavehub_adapter_http_axum::router;
use leavehub_adapter_http_axum::state::AppState;
use leavehub_adapter_storage_sqlite_sqlx::{
    Config, SqliteApplicationRepository, SqliteEmployeeRepository, SqliteEventRepository,
};
use leavehub_app::mailer::TracingMailer;
use leavehub_app::services::application_service::ApplicationService;
use leavehub_app::services::employee_service::EmployeeService;
use serde_json::{Value, json};
use tower::ServiceExt;

type Service = ApplicationService<
    SqliteApplicationRepository,
    SqliteEventRepository,
    SqliteEmployeeRepository,
    TracingMailer,
>;

/// Build a fully-wired router backed by an in-memory `SQLite` database,
/// along with the lifecycle service it shares with the sweeper.
async fn app() -> (axum::Router, Arc<Service>) {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let application_service = Arc::new(ApplicationService::new(
        SqliteApplicationRepository::new(pool.clone()),
        SqliteEventRepository::new(pool.clone()),
        SqliteEmployeeRepository::new(pool.clone()),
        TracingMailer::new("LeaveHub"),
    ));
    let employee_service = Arc::new(EmployeeService::new(SqliteEmployeeRepository::new(pool)));

    let state = AppState::from_arcs(Arc::clone(&application_service), employee_service);
    (router::build(state), application_service)
}

async fn call(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a manager (100) and two reports (7, 8).
async fn seed_staff(app: &axum::Router) {
    for (staff_id, first_name, manager) in [(100, "Mina", 100), (7, "Ravi", 100), (8, "Ola", 100)] {
        let (status, _) = call(
            app,
            "POST",
            "/api/employees",
            Some(json!({
                "staff_id": staff_id,
                "first_name": first_name,
                "last_name": "Tan",
                "email": format!("{}@example.com", first_name.to_lowercase()),
                "reporting_manager": manager,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

async fn create_application(app: &axum::Router, dates: &[&str]) -> Value {
    let dates: Vec<Value> = dates
        .iter()
        .map(|date| json!({ "date": date, "hour": "FULLDAY" }))
        .collect();
    let (status, body) = call(
        app,
        "POST",
        "/api/applications",
        Some(json!({
            "staff_id": 7,
            "reason": "Focus work",
            "location": "Home",
            "dates": dates,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn decide(app: &axum::Router, id: &str, approver_id: i64, outcome: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        &format!("/api/applications/{id}/decision"),
        Some(json!({ "approver_id": approver_id, "outcome": outcome })),
    )
    .await
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (app, _) = app().await;

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_reports_of_a_manager() {
    let (app, _) = app().await;
    seed_staff(&app).await;

    let (status, body) = call(&app, "GET", "/api/employees/100/reports", None).await;

    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["staff_id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![7, 8]);
}

#[tokio::test]
async fn should_reject_duplicate_employee() {
    let (app, _) = app().await;
    seed_staff(&app).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/employees",
        Some(json!({
            "staff_id": 7,
            "first_name": "Ravi",
            "last_name": "Tan",
            "email": "ravi@example.com",
            "reporting_manager": 100,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains('7'));
}

// ---------------------------------------------------------------------------
// Application lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_application_with_events_and_manager_as_approver() {
    let (app, _) = app().await;
    seed_staff(&app).await;

    let created = create_application(&app, &["2030-03-04", "2030-03-06"]).await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["application_state"], "new_application");
    assert_eq!(created["approver_id"], 100);

    let id = created["id"].as_str().unwrap();
    let (status, body) = call(&app, "GET", &format!("/api/applications/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["events"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_reject_application_for_unknown_employee() {
    let (app, _) = app().await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/applications",
        Some(json!({
            "staff_id": 404,
            "reason": "Focus work",
            "location": "Home",
            "dates": [{ "date": "2030-03-04", "hour": "AM" }],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_list_pending_applications_by_approver() {
    let (app, _) = app().await;
    seed_staff(&app).await;
    create_application(&app, &["2030-03-04"]).await;
    create_application(&app, &["2030-03-05"]).await;

    let (status, body) = call(
        &app,
        "GET",
        "/api/applications?approver_id=100&status=pending",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_forbid_decision_by_someone_other_than_the_approver() {
    let (app, _) = app().await;
    seed_staff(&app).await;
    let created = create_application(&app, &["2030-03-04"]).await;

    let (status, _) = decide(&app, created["id"].as_str().unwrap(), 8, "approved").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_approve_then_cancel_through_a_cancel_request() {
    let (app, _) = app().await;
    seed_staff(&app).await;
    let created = create_application(&app, &["2030-03-04"]).await;
    let id = created["id"].as_str().unwrap();

    let (status, approved) = decide(&app, id, 100, "approved").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");

    // The owner cannot withdraw an approved application directly.
    let (status, requested) = call(
        &app,
        "POST",
        &format!("/api/applications/{id}/withdraw"),
        Some(json!({ "editor_id": 7, "reason": "Plans changed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requested["status"], "pending");
    assert_eq!(requested["application_state"], "cancel_request");

    let (status, cancelled) = decide(&app, id, 100, "approved").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "withdrawn");

    // A second decision loses: the application is no longer pending.
    let (status, _) = decide(&app, id, 100, "rejected").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_turn_edit_of_approved_application_into_change_request() {
    let (app, _) = app().await;
    seed_staff(&app).await;
    let created = create_application(&app, &["2030-03-04"]).await;
    let id = created["id"].as_str().unwrap();
    decide(&app, id, 100, "approved").await;

    let (status, proposal) = call(
        &app,
        "PUT",
        &format!("/api/applications/{id}"),
        Some(json!({
            "editor_id": 7,
            "reason": "Focus work",
            "location": "Home",
            "dates": [{ "date": "2030-03-11", "hour": "PM" }],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(proposal["application_state"], "change_request");
    assert_eq!(proposal["original_application_id"], created["id"]);

    let (_, original) = call(&app, "GET", &format!("/api/applications/{id}"), None).await;
    assert_eq!(original["status"], "superseded");
}

#[tokio::test]
async fn should_withdraw_application_when_its_last_event_is_removed() {
    let (app, _) = app().await;
    seed_staff(&app).await;
    let created = create_application(&app, &["2030-03-04"]).await;
    let id = created["id"].as_str().unwrap();

    let (_, detail) = call(&app, "GET", &format!("/api/applications/{id}"), None).await;
    let event_id = detail["events"][0]["id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/applications/{id}/events/{event_id}/withdraw"),
        Some(json!({ "editor_id": 7 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "removed");

    let (_, detail) = call(&app, "GET", &format!("/api/applications/{id}"), None).await;
    assert_eq!(detail["status"], "withdrawn");
    assert!(detail["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_withdrawal_of_withdrawn_application() {
    let (app, _) = app().await;
    seed_staff(&app).await;
    let created = create_application(&app, &["2030-03-04"]).await;
    let uri = format!("/api/applications/{}/withdraw", created["id"].as_str().unwrap());

    let (status, _) = call(&app, "POST", &uri, Some(json!({ "editor_id": 7 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, "POST", &uri, Some(json!({ "editor_id": 7 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Sweeper
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_auto_reject_stale_pending_applications() {
    let (app, service) = app().await;
    seed_staff(&app).await;
    let stale = create_application(&app, &["2020-01-06"]).await;
    let fresh = create_application(&app, &["2099-01-06"]).await;

    let report = service.reject_old_applications().await.unwrap();

    assert_eq!(report.examined, 2);
    assert_eq!(report.rejected.len(), 1);
    assert!(report.failed.is_empty());

    let (_, stale) = call(
        &app,
        "GET",
        &format!("/api/applications/{}", stale["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(stale["status"], "rejected");

    let (_, fresh) = call(
        &app,
        "GET",
        &format!("/api/applications/{}", fresh["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(fresh["status"], "pending");
}
