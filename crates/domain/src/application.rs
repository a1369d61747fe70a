//! Application — a leave or work-arrangement request.
//!
//! An application is created `pending` with state `new_application`. Follow-on
//! requests (change, cancel, cancel-one) are tracked either as a flag on the
//! same record (cancel) or as a new record pointing back through
//! `original_application_id` (change, cancel-one). Back-references are plain
//! ids, looked up through the repositories, never an in-memory graph.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LeaveHubError, ValidationError};
use crate::id::{ApplicationId, StaffId};
use crate::schedule::{DateSlot, RecurrenceType, Schedule};
use crate::time::{Timestamp, add_months};

/// Longest span, in calendar months, between the first requested date and `end_date`.
pub const MAX_SPAN_MONTHS: u32 = 3;

text_enum!(
    /// Where an application stands in its lifecycle.
    ApplicationStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Withdrawn => "withdrawn",
        /// Replaced by a later application.
        Superseded => "superseded",
    }
);

impl ApplicationStatus {
    /// Terminal statuses never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Withdrawn | Self::Superseded)
    }
}

text_enum!(
    /// Kind of request a pending application represents.
    ApplicationState {
        NewApplication => "new_application",
        CancelRequest => "cancel_request",
        ChangeRequest => "change_request",
        CancelOneRequest => "cancel_one_request",
    }
);

/// A persisted application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub staff_id: StaffId,
    pub approver_id: Option<StaffId>,
    pub reason: String,
    pub description: Option<String>,
    pub status: ApplicationStatus,
    pub application_state: Option<ApplicationState>,
    pub original_application_id: Option<ApplicationId>,
    pub outcome_reason: Option<String>,
    pub recurring: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub end_date: Option<NaiveDate>,
    pub created_on: Timestamp,
    pub last_updated_on: Timestamp,
}

impl Application {
    /// A fresh `pending` record of the given kind built from `details`.
    #[must_use]
    pub fn pending(
        staff_id: StaffId,
        approver_id: Option<StaffId>,
        state: ApplicationState,
        details: &ApplicationDetails,
        now: Timestamp,
    ) -> Self {
        let mut application = Self {
            id: ApplicationId::new(),
            staff_id,
            approver_id,
            reason: String::new(),
            description: None,
            status: ApplicationStatus::Pending,
            application_state: Some(state),
            original_application_id: None,
            outcome_reason: None,
            recurring: false,
            recurrence_type: None,
            end_date: None,
            created_on: now,
            last_updated_on: now,
        };
        application.apply_details(details, now);
        application
    }

    /// Overwrite the descriptive and recurrence fields with `details`.
    pub fn apply_details(&mut self, details: &ApplicationDetails, now: Timestamp) {
        self.reason.clone_from(&details.reason);
        self.description.clone_from(&details.description);
        self.recurring = details.recurring;
        if details.recurring {
            self.recurrence_type = details.recurrence_type;
            self.end_date = details.end_date;
        } else {
            self.recurrence_type = None;
            self.end_date = None;
        }
        self.last_updated_on = now;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// A pending `cancel_one_request` tracking record for `original`.
    ///
    /// The record owns no schedule of its own; the marker event it carries
    /// points at the event to be cancelled.
    #[must_use]
    pub fn cancel_one_request(original: &Self, reason: String, now: Timestamp) -> Self {
        Self {
            id: ApplicationId::new(),
            staff_id: original.staff_id,
            approver_id: original.approver_id,
            reason,
            description: None,
            status: ApplicationStatus::Pending,
            application_state: Some(ApplicationState::CancelOneRequest),
            original_application_id: Some(original.id),
            outcome_reason: None,
            recurring: false,
            recurrence_type: None,
            end_date: None,
            created_on: now,
            last_updated_on: now,
        }
    }
}

/// Descriptive content shared by creation and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDetails {
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    pub dates: Vec<DateSlot>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub recurrence_type: Option<RecurrenceType>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ApplicationDetails {
    /// Validate the request and resolve its [`Schedule`].
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::Validation`] when:
    /// - no date was supplied ([`ValidationError::NoRequestedDates`])
    /// - `reason` is blank ([`ValidationError::EmptyReason`])
    /// - `recurring` lacks `recurrence_type` or `end_date` ([`ValidationError::IncompleteRecurrence`])
    /// - `recurring` supplies several dates ([`ValidationError::RecurringWithMultipleDates`])
    /// - `end_date` precedes the first date or lies more than
    ///   [`MAX_SPAN_MONTHS`] after it, whether or not the request recurs
    pub fn schedule(&self) -> Result<Schedule, LeaveHubError> {
        let Some(first) = self.dates.first().copied() else {
            return Err(ValidationError::NoRequestedDates.into());
        };
        if self.reason.trim().is_empty() {
            return Err(ValidationError::EmptyReason.into());
        }

        let recurrence = if self.recurring {
            match (self.recurrence_type, self.end_date) {
                (Some(recurrence), Some(end)) => Some((recurrence, end)),
                _ => return Err(ValidationError::IncompleteRecurrence.into()),
            }
        } else {
            None
        };

        if let Some(end) = self.end_date {
            if end < first.date {
                return Err(ValidationError::EndDateBeforeStart.into());
            }
            let limit = add_months(first.date, MAX_SPAN_MONTHS)
                .ok_or(ValidationError::EndDateTooFar)?;
            if end > limit {
                return Err(ValidationError::EndDateTooFar.into());
            }
        }

        match recurrence {
            Some(_) if self.dates.len() > 1 => {
                Err(ValidationError::RecurringWithMultipleDates.into())
            }
            Some((recurrence, end)) => Ok(Schedule::Recurring {
                start: first,
                recurrence,
                end,
            }),
            None if self.dates.len() == 1 => Ok(Schedule::Single(first)),
            None => Ok(Schedule::Multiple(self.dates.clone())),
        }
    }
}

/// Creation input for a brand-new application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub staff_id: StaffId,
    #[serde(flatten)]
    pub details: ApplicationDetails,
}

/// Update input: the proposed content and who is proposing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    pub editor_id: StaffId,
    #[serde(flatten)]
    pub details: ApplicationDetails,
}

/// Withdrawal input, for a whole application or a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub editor_id: StaffId,
    #[serde(default)]
    pub reason: Option<String>,
}
