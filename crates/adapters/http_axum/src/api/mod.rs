//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod applications;
#[allow(clippy::missing_errors_doc)]
pub mod employees;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post};

use leavehub_app::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};
use leavehub_domain::error::{LeaveHubError, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<AR, EVR, EMR, N>() -> Router<AppState<AR, EVR, EMR, N>>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        // Applications
        .route(
            "/applications",
            get(applications::list::<AR, EVR, EMR, N>)
                .post(applications::create::<AR, EVR, EMR, N>),
        )
        .route(
            "/applications/{id}",
            get(applications::get::<AR, EVR, EMR, N>)
                .put(applications::update::<AR, EVR, EMR, N>),
        )
        .route(
            "/applications/{id}/withdraw",
            post(applications::withdraw::<AR, EVR, EMR, N>),
        )
        .route(
            "/applications/{id}/events/{event_id}/withdraw",
            post(applications::withdraw_event::<AR, EVR, EMR, N>),
        )
        .route(
            "/applications/{id}/decision",
            post(applications::decide::<AR, EVR, EMR, N>),
        )
        // Employees
        .route("/employees", post(employees::create::<AR, EVR, EMR, N>))
        .route("/employees/{id}", get(employees::get::<AR, EVR, EMR, N>))
        .route(
            "/employees/{id}/reports",
            get(employees::reports::<AR, EVR, EMR, N>),
        )
}

/// Parse a path segment, reporting the offending field on failure.
pub(crate) fn parse_path<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ApiError> {
    T::from_str(raw).map_err(|_| {
        ApiError::from(LeaveHubError::Validation(ValidationError::InvalidValue {
            field,
            value: raw.to_string(),
        }))
    })
}
