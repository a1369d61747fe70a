//! JSON REST handlers for employees.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use leavehub_app::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};
use leavehub_domain::employee::Employee;
use leavehub_domain::id::StaffId;

use super::parse_path;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Employee>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the reports endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Employee>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Employee>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `POST /api/employees`
pub async fn create<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Json(employee): Json<Employee>,
) -> Result<CreateResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let created = state.employee_service.create_employee(employee).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/employees/{id}`
pub async fn get<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let staff_id: StaffId = parse_path("staff_id", &id)?;
    let employee = state.employee_service.get_employee(staff_id).await?;
    Ok(GetResponse::Ok(Json(employee)))
}

/// `GET /api/employees/{id}/reports`
pub async fn reports<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let manager_id: StaffId = parse_path("staff_id", &id)?;
    let reports = state
        .employee_service
        .get_employees_under_manager(manager_id)
        .await?;
    Ok(ListResponse::Ok(Json(reports)))
}
