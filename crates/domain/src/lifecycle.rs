//! Lifecycle rules — who may act on an application and what a decision does.
//!
//! The manager's decision is dispatched through [`Transition::resolve`], an
//! exhaustive table over `(application_state, outcome)`. Records without a
//! state resolve to [`Transition::NoOp`] explicitly.

use serde::{Deserialize, Serialize};

use crate::application::{Application, ApplicationState, ApplicationStatus};
use crate::employee::Employee;
use crate::error::ConflictError;
use crate::event::Event;
use crate::id::{ApplicationId, StaffId};

/// Reason recorded by the auto-rejection sweeper.
pub const AUTO_REJECT_REASON: &str =
    "Automatically rejected: no decision was made within two months of the requested date";

/// Months after its earliest event before a pending application goes stale.
pub const STALE_AFTER_MONTHS: u32 = 2;

text_enum!(
    /// A manager's verdict on a pending application.
    Outcome {
        Approved => "approved",
        Rejected => "rejected",
    }
);

impl Outcome {
    #[must_use]
    pub const fn status(self) -> ApplicationStatus {
        match self {
            Self::Approved => ApplicationStatus::Approved,
            Self::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// A manager's decision on one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub application_id: ApplicationId,
    pub approver_id: StaffId,
    pub outcome: Outcome,
    #[serde(default)]
    pub outcome_reason: Option<String>,
}

/// Capacity in which an editor acts on somebody's application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Manager,
    Owner,
}

impl Authority {
    /// Resolve the editor's authority over `owner`'s application.
    ///
    /// A manager editing their own application acts as manager.
    #[must_use]
    pub fn resolve(owner: &Employee, editor: &Employee) -> Option<Self> {
        if owner.is_managed_by(editor.staff_id) {
            Some(Self::Manager)
        } else if owner.staff_id == editor.staff_id {
            Some(Self::Owner)
        } else {
            None
        }
    }
}

/// How a withdrawal is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Withdrawal {
    /// Status goes straight to `withdrawn` (or the event is removed).
    Direct,
    /// The owner proposes cancelling an approved arrangement; the manager decides.
    Request,
}

impl Withdrawal {
    /// Pick the withdrawal path for an editor acting on `application`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConflictError`] when the application is terminal, or when
    /// the owner tries to withdraw while their own cancellation request is
    /// still awaiting the manager.
    pub fn resolve(authority: Authority, application: &Application) -> Result<Self, ConflictError> {
        ensure_live(application.status)?;
        match (authority, application.status, application.application_state) {
            (Authority::Owner, ApplicationStatus::Pending, Some(ApplicationState::CancelRequest)) => {
                Err(ConflictError::CancellationPending)
            }
            (Authority::Owner, ApplicationStatus::Approved, _) => Ok(Self::Request),
            _ => Ok(Self::Direct),
        }
    }
}

/// How an update is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Still awaiting a decision: overwrite the record.
    InPlace,
    /// Already approved: propose the new content as a change request.
    ChangeRequest,
}

impl Edit {
    /// Pick the update path for `application`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConflictError`] for withdrawn, rejected and superseded
    /// applications, and for pending cancellation requests.
    pub fn resolve(application: &Application) -> Result<Self, ConflictError> {
        match (application.status, application.application_state) {
            (ApplicationStatus::Withdrawn | ApplicationStatus::Rejected, _) => {
                Err(ConflictError::AlreadyWithdrawnOrRejected)
            }
            (ApplicationStatus::Superseded, _) => Err(ConflictError::AlreadySuperseded),
            (
                ApplicationStatus::Pending,
                Some(ApplicationState::CancelRequest | ApplicationState::CancelOneRequest),
            ) => Err(ConflictError::CancellationPending),
            (ApplicationStatus::Pending, _) => Ok(Self::InPlace),
            (ApplicationStatus::Approved, _) => Ok(Self::ChangeRequest),
        }
    }
}

/// Result of withdrawing a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "record", rename_all = "snake_case")]
pub enum EventWithdrawal {
    /// The event was deleted straight away.
    Removed(Event),
    /// A cancel-one request now awaits the manager.
    CancelRequested(Application),
}

/// Refuse withdrawals of applications in a terminal status.
///
/// # Errors
///
/// Returns the [`ConflictError`] matching the terminal status.
pub fn ensure_live(status: ApplicationStatus) -> Result<(), ConflictError> {
    match status {
        ApplicationStatus::Withdrawn => Err(ConflictError::AlreadyWithdrawn),
        ApplicationStatus::Rejected => Err(ConflictError::AlreadyWithdrawnOrRejected),
        ApplicationStatus::Superseded => Err(ConflictError::AlreadySuperseded),
        ApplicationStatus::Pending | ApplicationStatus::Approved => Ok(()),
    }
}

/// Effect of a decision, keyed by the kind of pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// New application: status becomes the outcome.
    Decide(ApplicationStatus),
    /// Cancel request approved: status becomes `withdrawn`.
    GrantCancellation,
    /// Cancel request rejected: status returns to `approved`.
    DenyCancellation,
    /// Change request approved: proposal approved, original superseded.
    ApproveChange,
    /// Change request rejected: proposal rejected, original restored.
    RejectChange,
    /// Cancel-one approved: the referenced event is removed.
    ApproveCancelOne,
    /// Cancel-one rejected: the tracking record is discarded.
    RejectCancelOne,
    /// No recognised request kind; the application is left untouched.
    NoOp,
}

impl Transition {
    #[must_use]
    pub fn resolve(state: Option<ApplicationState>, outcome: Outcome) -> Self {
        match (state, outcome) {
            (Some(ApplicationState::NewApplication), outcome) => Self::Decide(outcome.status()),
            (Some(ApplicationState::CancelRequest), Outcome::Approved) => Self::GrantCancellation,
            (Some(ApplicationState::CancelRequest), Outcome::Rejected) => Self::DenyCancellation,
            (Some(ApplicationState::ChangeRequest), Outcome::Approved) => Self::ApproveChange,
            (Some(ApplicationState::ChangeRequest), Outcome::Rejected) => Self::RejectChange,
            (Some(ApplicationState::CancelOneRequest), Outcome::Approved) => {
                Self::ApproveCancelOne
            }
            (Some(ApplicationState::CancelOneRequest), Outcome::Rejected) => {
                Self::RejectCancelOne
            }
            (None, _) => Self::NoOp,
        }
    }
}

/// Outcome text left on an application replaced by a change request.
#[must_use]
pub fn superseded_note(change_request: ApplicationId) -> String {
    format!("Superseded by change request (Application ID: {change_request})")
}

/// Outcome text left on an original whose change request was rejected.
#[must_use]
pub fn change_rejected_note(change_request: ApplicationId) -> String {
    format!("Change request rejected (Application ID: {change_request})")
}

/// Outcome text left on an original whose change request was withdrawn.
#[must_use]
pub fn change_withdrawn_note(change_request: ApplicationId) -> String {
    format!("Change request withdrawn (Application ID: {change_request})")
}
