//! Notifications — structured outcome data handed to the notifier port.
//!
//! Every lifecycle transition produces one [`Notification`]. The notifier
//! renders it into a human-readable message; the wording is not part of
//! the contract.

use serde::Serialize;

use crate::application::Application;
use crate::employee::Employee;
use crate::event::Event;
use crate::id::StaffId;
use crate::lifecycle::Outcome;

/// Somebody who receives a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub staff_id: StaffId,
    pub name: String,
    pub email: String,
}

impl From<&Employee> for Recipient {
    fn from(employee: &Employee) -> Self {
        Self {
            staff_id: employee.staff_id,
            name: employee.full_name(),
            email: employee.email.clone(),
        }
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    Created {
        application: Application,
        events: Vec<Event>,
    },
    Updated {
        application: Application,
        events: Vec<Event>,
    },
    ChangeRequested {
        original: Application,
        proposed: Application,
        original_events: Vec<Event>,
        proposed_events: Vec<Event>,
    },
    Withdrawn {
        application: Application,
        by_employee: bool,
    },
    CancelRequested {
        application: Application,
    },
    EventWithdrawn {
        application: Application,
        event: Event,
        by_employee: bool,
    },
    EventCancelRequested {
        application: Application,
        event: Event,
    },
    Decided {
        application: Application,
    },
    CancelDecided {
        application: Application,
        outcome: Outcome,
    },
    ChangeDecided {
        original: Application,
        proposed: Application,
        outcome: Outcome,
    },
    CancelOneDecided {
        application: Application,
        event: Event,
        outcome: Outcome,
    },
    AutoRejected {
        application: Application,
    },
}

impl Notice {
    /// The application the notice is about (the proposal, for change notices).
    #[must_use]
    pub fn application(&self) -> &Application {
        match self {
            Self::Created { application, .. }
            | Self::Updated { application, .. }
            | Self::Withdrawn { application, .. }
            | Self::CancelRequested { application }
            | Self::EventWithdrawn { application, .. }
            | Self::EventCancelRequested { application, .. }
            | Self::Decided { application }
            | Self::CancelDecided { application, .. }
            | Self::CancelOneDecided { application, .. }
            | Self::AutoRejected { application } => application,
            Self::ChangeRequested { proposed, .. } | Self::ChangeDecided { proposed, .. } => {
                proposed
            }
        }
    }

    /// One-line summary suitable for an email subject.
    #[must_use]
    pub fn subject(&self) -> String {
        let id = self.application().id;
        match self {
            Self::Created { .. } => format!("New application submitted (Application ID: {id})"),
            Self::Updated { .. } => format!("Application updated (Application ID: {id})"),
            Self::ChangeRequested { original, .. } => format!(
                "Change requested for application {} (Application ID: {id})",
                original.id
            ),
            Self::Withdrawn { by_employee, .. } => {
                let by = if *by_employee { "employee" } else { "manager" };
                format!("Application withdrawn by {by} (Application ID: {id})")
            }
            Self::CancelRequested { .. } => {
                format!("Cancellation requested (Application ID: {id})")
            }
            Self::EventWithdrawn { event, .. } => format!(
                "Arrangement on {} withdrawn (Application ID: {id})",
                event.requested_date
            ),
            Self::EventCancelRequested { event, .. } => format!(
                "Cancellation requested for {} (Application ID: {id})",
                event.requested_date
            ),
            Self::Decided { application } => {
                format!("Application {} (Application ID: {id})", application.status)
            }
            Self::CancelDecided { outcome, .. } => {
                format!("Cancellation request {outcome} (Application ID: {id})")
            }
            Self::ChangeDecided { outcome, .. } => {
                format!("Change request {outcome} (Application ID: {id})")
            }
            Self::CancelOneDecided { event, outcome, .. } => format!(
                "Cancellation for {} {outcome} (Application ID: {id})",
                event.requested_date
            ),
            Self::AutoRejected { .. } => {
                format!("Application automatically rejected (Application ID: {id})")
            }
        }
    }
}

/// A notice addressed to its recipients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub recipients: Vec<Recipient>,
    pub notice: Notice,
}
