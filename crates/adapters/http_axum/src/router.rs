//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use leavehub_app::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the JSON API under `/api` next to a plain-text `/health` check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<AR, EVR, EMR, N>(state: AppState<AR, EVR, EMR, N>) -> Router
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use leavehub_app::mailer::TracingMailer;
    use leavehub_app::services::application_service::ApplicationService;
    use leavehub_app::services::employee_service::EmployeeService;
    use leavehub_domain::application::{Application, ApplicationState, ApplicationStatus};
    use leavehub_domain::employee::Employee;
    use leavehub_domain::error::LeaveHubError;
    use leavehub_domain::event::Event;
    use leavehub_domain::id::{ApplicationId, EventId, StaffId};
    use tower::ServiceExt;

    struct StubApplicationRepo;
    struct StubEventRepo;
    struct StubEmployeeRepo;

    impl ApplicationRepository for StubApplicationRepo {
        async fn create(&self, application: Application) -> Result<Application, LeaveHubError> {
            Ok(application)
        }
        async fn get_by_id(&self, _id: ApplicationId) -> Result<Option<Application>, LeaveHubError> {
            Ok(None)
        }
        async fn find_by_staff_id(
            &self,
            _staff_id: StaffId,
        ) -> Result<Vec<Application>, LeaveHubError> {
            Ok(vec![])
        }
        async fn find_by_approver_id(
            &self,
            _approver_id: StaffId,
        ) -> Result<Vec<Application>, LeaveHubError> {
            Ok(vec![])
        }
        async fn find_by_status(
            &self,
            _status: ApplicationStatus,
        ) -> Result<Vec<Application>, LeaveHubError> {
            Ok(vec![])
        }
        async fn update_pending(&self, _application: &Application) -> Result<bool, LeaveHubError> {
            Ok(false)
        }
        async fn update_status(
            &self,
            _id: ApplicationId,
            _status: ApplicationStatus,
            _outcome_reason: Option<String>,
        ) -> Result<(), LeaveHubError> {
            Ok(())
        }
        async fn update_state(
            &self,
            _id: ApplicationId,
            _state: Option<ApplicationState>,
            _outcome_reason: Option<String>,
            _status: ApplicationStatus,
        ) -> Result<(), LeaveHubError> {
            Ok(())
        }
        async fn compare_and_set_status(
            &self,
            _id: ApplicationId,
            _expected: ApplicationStatus,
            _status: ApplicationStatus,
            _outcome_reason: Option<String>,
        ) -> Result<bool, LeaveHubError> {
            Ok(false)
        }
        async fn delete(&self, _id: ApplicationId) -> Result<(), LeaveHubError> {
            Ok(())
        }
    }

    impl EventRepository for StubEventRepo {
        async fn create(&self, event: Event) -> Result<Event, LeaveHubError> {
            Ok(event)
        }
        async fn get_by_id(&self, _id: EventId) -> Result<Option<Event>, LeaveHubError> {
            Ok(None)
        }
        async fn find_by_application_id(
            &self,
            _application_id: ApplicationId,
        ) -> Result<Vec<Event>, LeaveHubError> {
            Ok(vec![])
        }
        async fn find_by_application_ids(
            &self,
            _application_ids: Vec<ApplicationId>,
        ) -> Result<Vec<Event>, LeaveHubError> {
            Ok(vec![])
        }
        async fn find_first_by_application_id(
            &self,
            _application_id: ApplicationId,
        ) -> Result<Option<Event>, LeaveHubError> {
            Ok(None)
        }
        async fn find_by_original_event_id(
            &self,
            _original_event_id: EventId,
        ) -> Result<Vec<Event>, LeaveHubError> {
            Ok(vec![])
        }
        async fn delete(&self, _id: EventId) -> Result<(), LeaveHubError> {
            Ok(())
        }
        async fn delete_by_application_id(
            &self,
            _application_id: ApplicationId,
        ) -> Result<(), LeaveHubError> {
            Ok(())
        }
    }

    impl EmployeeRepository for StubEmployeeRepo {
        async fn create(&self, employee: Employee) -> Result<Employee, LeaveHubError> {
            Ok(employee)
        }
        async fn get_by_id(&self, _staff_id: StaffId) -> Result<Option<Employee>, LeaveHubError> {
            Ok(None)
        }
        async fn find_by_manager(
            &self,
            _manager_id: StaffId,
        ) -> Result<Vec<Employee>, LeaveHubError> {
            Ok(vec![])
        }
    }

    fn test_state() -> AppState<StubApplicationRepo, StubEventRepo, StubEmployeeRepo, TracingMailer>
    {
        AppState::new(
            ApplicationService::new(
                StubApplicationRepo,
                StubEventRepo,
                StubEmployeeRepo,
                TracingMailer::new("leavehub"),
            ),
            EmployeeService::new(StubEmployeeRepo),
        )
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = build(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (status, body) = send(get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_application() {
        let uri = format!("/api/applications/{}", ApplicationId::new());

        let (status, body) = send(get(&uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Application"));
    }

    #[tokio::test]
    async fn should_reject_malformed_application_id() {
        let (status, body) = send(get("/api/applications/not-a-uuid")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("application_id"));
    }

    #[tokio::test]
    async fn should_reject_application_without_dates() {
        let request = post_json(
            "/api/applications",
            serde_json::json!({
                "staff_id": 7,
                "reason": "Focus day",
                "location": "Home",
                "dates": [],
            }),
        );

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("error"));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_employee() {
        let (status, _) = send(get("/api/employees/42")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_list_no_pending_applications_when_store_is_empty() {
        let (status, body) = send(get("/api/applications")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn should_reject_decision_on_unknown_application() {
        let uri = format!("/api/applications/{}/decision", ApplicationId::new());
        let request = post_json(
            &uri,
            serde_json::json!({ "approver_id": 1, "outcome": "approved" }),
        );

        let (status, _) = send(request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
