//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use leavehub_domain::error::LeaveHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`LeaveHubError`] to an HTTP response with appropriate status code.
pub struct ApiError(LeaveHubError);

impl From<LeaveHubError> for ApiError {
    fn from(err: LeaveHubError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            LeaveHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            LeaveHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            LeaveHubError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            LeaveHubError::Forbidden(err) => (StatusCode::FORBIDDEN, err.to_string()),
            LeaveHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
