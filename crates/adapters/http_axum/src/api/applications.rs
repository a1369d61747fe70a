//! JSON REST handlers for applications.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use leavehub_app::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};
use leavehub_domain::application::{
    Application, ApplicationRequest, ApplicationState, ApplicationStatus, ApplicationUpdate,
    WithdrawRequest,
};
use leavehub_domain::event::Event;
use leavehub_domain::id::{ApplicationId, EventId, StaffId};
use leavehub_domain::lifecycle::{Decision, EventWithdrawal, Outcome};

use super::parse_path;
use crate::error::ApiError;
use crate::state::AppState;

/// Query filters for the list endpoint. Without any filter the pending
/// applications are returned.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<ApplicationStatus>,
    pub staff_id: Option<StaffId>,
    pub approver_id: Option<StaffId>,
}

/// Request body for approving or rejecting an application.
#[derive(Deserialize)]
pub struct DecisionRequest {
    pub approver_id: StaffId,
    pub outcome: Outcome,
    #[serde(default)]
    pub outcome_reason: Option<String>,
}

/// An application together with its events.
#[derive(Serialize)]
pub struct ApplicationWithEvents {
    #[serde(flatten)]
    pub application: Application,
    pub events: Vec<Event>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Application>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ApplicationWithEvents>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Application>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    /// A pending application edited in place.
    Updated(Json<Application>),
    /// An approved application; a change request was created instead.
    ChangeRequested(Json<Application>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Updated(json) => json.into_response(),
            Self::ChangeRequested(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the withdraw and decision endpoints.
pub enum TransitionResponse {
    Ok(Json<Application>),
}

impl IntoResponse for TransitionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the single-event withdraw endpoint.
pub enum WithdrawEventResponse {
    Removed(Json<EventWithdrawal>),
    CancelRequested(Json<EventWithdrawal>),
}

impl IntoResponse for WithdrawEventResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Removed(json) => json.into_response(),
            Self::CancelRequested(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/applications`
pub async fn list<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let service = &state.application_service;
    let applications = match (query.staff_id, query.approver_id, query.status) {
        (Some(staff_id), _, _) => service.get_applications_by_staff_id(staff_id).await?,
        (None, Some(approver_id), _) => {
            service.get_applications_by_approver_id(approver_id).await?
        }
        (None, None, Some(status)) => service.get_applications_by_status(status).await?,
        (None, None, None) => service.get_pending_applications().await?,
    };

    let applications = applications
        .into_iter()
        .filter(|a| query.approver_id.is_none_or(|id| a.approver_id == Some(id)))
        .filter(|a| query.status.is_none_or(|status| a.status == status))
        .collect();
    Ok(ListResponse::Ok(Json(applications)))
}

/// `GET /api/applications/{id}`
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
    let id: ApplicationId = parse_path("application_id", &id)?;
    let application = state.application_service.get_application(id).await?;
    let events = state.application_service.get_application_events(id).await?;
    Ok(GetResponse::Ok(Json(ApplicationWithEvents {
        application,
        events,
    })))
}

/// `POST /api/applications`
pub async fn create<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Json(req): Json<ApplicationRequest>,
) -> Result<CreateResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let created = state
        .application_service
        .create_application(req, ApplicationState::NewApplication)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/applications/{id}`
pub async fn update<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Path(id): Path<String>,
    Json(req): Json<ApplicationUpdate>,
) -> Result<UpdateResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let id: ApplicationId = parse_path("application_id", &id)?;
    let application = state.application_service.update_application(id, req).await?;
    if application.id == id {
        Ok(UpdateResponse::Updated(Json(application)))
    } else {
        Ok(UpdateResponse::ChangeRequested(Json(application)))
    }
}

/// `POST /api/applications/{id}/withdraw`
pub async fn withdraw<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Path(id): Path<String>,
    Json(req): Json<WithdrawRequest>,
) -> Result<TransitionResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let id: ApplicationId = parse_path("application_id", &id)?;
    let application = state
        .application_service
        .withdraw_application(id, req)
        .await?;
    Ok(TransitionResponse::Ok(Json(application)))
}

/// `POST /api/applications/{id}/events/{event_id}/withdraw`
pub async fn withdraw_event<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Path((id, event_id)): Path<(String, String)>,
    Json(req): Json<WithdrawRequest>,
) -> Result<WithdrawEventResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let id: ApplicationId = parse_path("application_id", &id)?;
    let event_id: EventId = parse_path("event_id", &event_id)?;
    let result = state
        .application_service
        .withdraw_application_event(id, event_id, req)
        .await?;
    match result {
        EventWithdrawal::Removed(_) => Ok(WithdrawEventResponse::Removed(Json(result))),
        EventWithdrawal::CancelRequested(_) => {
            Ok(WithdrawEventResponse::CancelRequested(Json(result)))
        }
    }
}

/// `POST /api/applications/{id}/decision`
pub async fn decide<AR, EVR, EMR, N>(
    State(state): State<AppState<AR, EVR, EMR, N>>,
    Path(id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<TransitionResponse, ApiError>
where
    AR: ApplicationRepository + Send + Sync + 'static,
    EVR: EventRepository + Send + Sync + 'static,
    EMR: EmployeeRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let application_id: ApplicationId = parse_path("application_id", &id)?;
    let decision = Decision {
        application_id,
        approver_id: req.approver_id,
        outcome: req.outcome,
        outcome_reason: req.outcome_reason,
    };
    let application = state
        .application_service
        .approve_reject_pending_applications(decision)
        .await?;
    Ok(TransitionResponse::Ok(Json(application)))
}
