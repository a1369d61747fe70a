//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`LeaveHubError`] via `#[from]`. The four client-facing categories map
//! one-to-one onto HTTP statuses in the axum adapter:
//!
//! | Variant | Meaning | HTTP |
//! |---------|---------|------|
//! | [`LeaveHubError::Validation`] | malformed request, not pending | 400 |
//! | [`LeaveHubError::Forbidden`] | caller may not act on the record | 403 |
//! | [`LeaveHubError::NotFound`] | missing application/event/employee | 404 |
//! | [`LeaveHubError::Conflict`] | record already in a terminal state | 409 |

use std::fmt;

/// Top-level error for every leavehub operation.
#[derive(Debug, thiserror::Error)]
pub enum LeaveHubError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    #[error("conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("forbidden: {0}")]
    Forbidden(#[from] ForbiddenError),

    /// Opaque failure raised by a storage adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Request rejected before any state was touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least one requested date is required")]
    NoRequestedDates,

    #[error("Reason must not be empty")]
    EmptyReason,

    #[error("Recurring applications must have recurrence_type and end_date set")]
    IncompleteRecurrence,

    #[error("Recurring applications take a single start date")]
    RecurringWithMultipleDates,

    #[error("End date must not be before the requested date")]
    EndDateBeforeStart,

    #[error("End date must be within 3 months of the requested date")]
    EndDateTooFar,

    #[error("Application is not pending")]
    NotPending,

    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// A referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found: {}", self.entity, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// The target record is in a state that forbids the requested change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("Application already withdrawn")]
    AlreadyWithdrawn,

    #[error("Application already withdrawn or rejected")]
    AlreadyWithdrawnOrRejected,

    #[error("Application already superseded")]
    AlreadySuperseded,

    #[error("A cancellation request for this application is awaiting a decision")]
    CancellationPending,

    #[error("Cancellation already requested for event {0}")]
    EventCancellationPending(String),

    #[error("Employee already exists: {0}")]
    EmployeeExists(String),
}

/// The caller is not allowed to act on the record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenError {
    #[error("only the applicant or their reporting manager may modify this application")]
    NotOwnerOrManager,

    #[error("only the assigned approver may decide this application")]
    NotApprover,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err: LeaveHubError = NotFoundError {
            entity: "Editor",
            id: "42".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Editor not found: 42");
    }

    #[test]
    fn should_keep_exact_recurrence_message() {
        let err = ValidationError::IncompleteRecurrence;
        assert_eq!(
            err.to_string(),
            "Recurring applications must have recurrence_type and end_date set"
        );
    }

    #[test]
    fn should_convert_sub_errors_into_top_level_variants() {
        let conflict: LeaveHubError = ConflictError::AlreadyWithdrawn.into();
        assert!(matches!(conflict, LeaveHubError::Conflict(_)));

        let forbidden: LeaveHubError = ForbiddenError::NotApprover.into();
        assert!(matches!(forbidden, LeaveHubError::Forbidden(_)));
    }
}
