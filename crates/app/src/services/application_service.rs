//! Application service — the leave/work-arrangement lifecycle.
//!
//! Every operation follows the same shape: load and check, write through the
//! repositories, then hand a [`Notice`] to the notifier. Notification is
//! best-effort; a committed transition is never rolled back because a
//! message could not be delivered.

use std::collections::HashMap;

use chrono::NaiveDate;
use leavehub_domain::application::{
    Application, ApplicationDetails, ApplicationRequest, ApplicationState, ApplicationStatus,
    ApplicationUpdate, WithdrawRequest,
};
use leavehub_domain::employee::Employee;
use leavehub_domain::error::{
    ConflictError, ForbiddenError, LeaveHubError, NotFoundError, ValidationError,
};
use leavehub_domain::event::Event;
use leavehub_domain::id::{ApplicationId, EventId, StaffId};
use leavehub_domain::lifecycle::{
    self, AUTO_REJECT_REASON, Authority, Decision, Edit, EventWithdrawal, Outcome,
    STALE_AFTER_MONTHS, Transition, Withdrawal,
};
use leavehub_domain::notification::{Notice, Notification, Recipient};
use leavehub_domain::schedule::Schedule;
use leavehub_domain::time;

use crate::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};
use crate::services::event_expander::expand_events;

/// Outcome text recorded when the last event of an application is removed.
const ALL_EVENTS_WITHDRAWN: &str = "All events withdrawn";

/// Summary of one auto-rejection sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Pending applications looked at.
    pub examined: usize,
    /// Stale applications rejected in this run.
    pub rejected: Vec<ApplicationId>,
    /// Stale applications decided by somebody else before the sweep got to them.
    pub skipped: usize,
    /// Stale applications whose rejection failed.
    pub failed: Vec<ApplicationId>,
}

/// Application service for the request/decision lifecycle.
pub struct ApplicationService<AR, EVR, EMR, N> {
    applications: AR,
    events: EVR,
    employees: EMR,
    notifier: N,
}

impl<AR, EVR, EMR, N> ApplicationService<AR, EVR, EMR, N>
where
    AR: ApplicationRepository + Send + Sync,
    EVR: EventRepository + Send + Sync,
    EMR: EmployeeRepository + Send + Sync,
    N: Notifier + Send + Sync,
{
    /// Create a new service backed by the given ports.
    pub fn new(applications: AR, events: EVR, employees: EMR, notifier: N) -> Self {
        Self {
            applications,
            events,
            employees,
            notifier,
        }
    }

    /// Look up an application by id.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::NotFound`] when no application with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_application(&self, id: ApplicationId) -> Result<Application, LeaveHubError> {
        self.applications.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Application",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Events of an application, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::NotFound`] when the application does not
    /// exist, or a storage error from the repositories.
    pub async fn get_application_events(
        &self,
        id: ApplicationId,
    ) -> Result<Vec<Event>, LeaveHubError> {
        self.get_application(id).await?;
        self.events.find_by_application_id(id).await
    }

    /// Applications currently in `status`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, LeaveHubError> {
        self.applications.find_by_status(status).await
    }

    /// Applications owned by `staff_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_applications_by_staff_id(
        &self,
        staff_id: StaffId,
    ) -> Result<Vec<Application>, LeaveHubError> {
        self.applications.find_by_staff_id(staff_id).await
    }

    /// Applications assigned to `approver_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_applications_by_approver_id(
        &self,
        approver_id: StaffId,
    ) -> Result<Vec<Application>, LeaveHubError> {
        self.applications.find_by_approver_id(approver_id).await
    }

    /// Applications still awaiting a decision.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_pending_applications(&self) -> Result<Vec<Application>, LeaveHubError> {
        self.applications.get_pending().await
    }

    /// Submit a new application and materialize its events.
    ///
    /// The approver is the owner's current reporting manager. Owner and
    /// approver are notified.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveHubError::Validation`] for a malformed request,
    /// [`LeaveHubError::NotFound`] when the owner does not exist, or a
    /// storage error from the repositories.
    #[tracing::instrument(skip(self, request), fields(staff_id = %request.staff_id))]
    pub async fn create_application(
        &self,
        request: ApplicationRequest,
        state: ApplicationState,
    ) -> Result<Application, LeaveHubError> {
        let schedule = request.details.schedule()?;
        let owner = self.require_employee("Employee", request.staff_id).await?;

        let application = Application::pending(
            owner.staff_id,
            owner.reporting_manager,
            state,
            &request.details,
            time::now(),
        );
        let (application, events) = self
            .insert_with_events(application, &schedule, &request.details.location)
            .await?;

        tracing::info!(application_id = %application.id, events = events.len(), "application created");
        self.notify_parties(Notice::Created {
            application: application.clone(),
            events,
        })
        .await;
        Ok(application)
    }

    /// Edit an application.
    ///
    /// A pending application is rewritten in place and its events are
    /// re-materialized. An approved application is left untouched and a
    /// change request carrying the new content is returned instead.
    ///
    /// # Errors
    ///
    /// - [`LeaveHubError::NotFound`] when the application or editor is missing
    /// - [`LeaveHubError::Conflict`] when the application can no longer be edited
    /// - [`LeaveHubError::Forbidden`] when the editor is neither owner nor manager
    /// - [`LeaveHubError::Validation`] for malformed content
    #[tracing::instrument(skip(self, update), fields(editor_id = %update.editor_id))]
    pub async fn update_application(
        &self,
        id: ApplicationId,
        update: ApplicationUpdate,
    ) -> Result<Application, LeaveHubError> {
        let existing = self.get_application(id).await?;
        let edit = Edit::resolve(&existing)?;
        self.authorize(&existing, update.editor_id).await?;
        let schedule = update.details.schedule()?;
        if edit == Edit::ChangeRequest && self.has_pending_event_cancellations(id).await? {
            return Err(ConflictError::CancellationPending.into());
        }

        match edit {
            Edit::InPlace => self.edit_pending(existing, &update.details, &schedule).await,
            Edit::ChangeRequest => {
                self.request_change(existing, &update.details, &schedule)
                    .await
            }
        }
    }

    /// Withdraw an application, or ask the manager to cancel an approved one.
    ///
    /// # Errors
    ///
    /// - [`LeaveHubError::NotFound`] when the application or editor is missing
    /// - [`LeaveHubError::Forbidden`] when the editor is neither owner nor manager
    /// - [`LeaveHubError::Conflict`] when the application is already terminal,
    ///   or a cancellation of it or of one of its events is awaiting a decision
    #[tracing::instrument(skip(self, request), fields(editor_id = %request.editor_id))]
    pub async fn withdraw_application(
        &self,
        id: ApplicationId,
        request: WithdrawRequest,
    ) -> Result<Application, LeaveHubError> {
        let application = self.get_application(id).await?;
        let authority = self.authorize(&application, request.editor_id).await?;

        let withdrawal = Withdrawal::resolve(authority, &application)?;
        if withdrawal == Withdrawal::Request && self.has_pending_event_cancellations(id).await? {
            return Err(ConflictError::CancellationPending.into());
        }

        match withdrawal {
            Withdrawal::Direct => {
                self.applications
                    .update_status(id, ApplicationStatus::Withdrawn, request.reason)
                    .await?;
                if application.is_pending() {
                    self.release_original(&application).await?;
                }
                let application = self.get_application(id).await?;
                tracing::info!(application_id = %id, "application withdrawn");
                self.notify_parties(Notice::Withdrawn {
                    application: application.clone(),
                    by_employee: authority == Authority::Owner,
                })
                .await;
                Ok(application)
            }
            Withdrawal::Request => {
                self.applications
                    .update_state(
                        id,
                        Some(ApplicationState::CancelRequest),
                        request.reason,
                        ApplicationStatus::Pending,
                    )
                    .await?;
                let application = self.get_application(id).await?;
                tracing::info!(application_id = %id, "cancellation requested");
                self.notify_parties(Notice::CancelRequested {
                    application: application.clone(),
                })
                .await;
                Ok(application)
            }
        }
    }

    /// Withdraw one event of an application.
    ///
    /// The event is removed straight away when the editor is the manager or
    /// the application is still pending; removing the last event withdraws
    /// the application. For an approved application the owner instead gets
    /// a pending cancel-one request.
    ///
    /// # Errors
    ///
    /// - [`LeaveHubError::NotFound`] when the application, event or editor is missing
    /// - [`LeaveHubError::Forbidden`] when the editor is neither owner nor manager
    /// - [`LeaveHubError::Conflict`] when the application is terminal or the
    ///   event already has a cancellation awaiting a decision
    #[tracing::instrument(skip(self, request), fields(editor_id = %request.editor_id))]
    pub async fn withdraw_application_event(
        &self,
        application_id: ApplicationId,
        event_id: EventId,
        request: WithdrawRequest,
    ) -> Result<EventWithdrawal, LeaveHubError> {
        let application = self.get_application(application_id).await?;
        let event = self
            .events
            .get_by_id(event_id)
            .await?
            .filter(|event| event.application_id == application_id)
            .ok_or_else(|| NotFoundError {
                entity: "Event",
                id: event_id.to_string(),
            })?;
        let authority = self.authorize(&application, request.editor_id).await?;
        let withdrawal = Withdrawal::resolve(authority, &application)?;

        if self.has_pending_cancellation(event_id).await? {
            return Err(ConflictError::EventCancellationPending(event_id.to_string()).into());
        }

        match withdrawal {
            Withdrawal::Direct => {
                self.events.delete(event_id).await?;
                let remaining = self.events.find_by_application_id(application_id).await?;
                let application = if remaining.is_empty() {
                    let reason = request
                        .reason
                        .unwrap_or_else(|| ALL_EVENTS_WITHDRAWN.to_string());
                    self.applications
                        .update_status(application_id, ApplicationStatus::Withdrawn, Some(reason))
                        .await?;
                    if application.is_pending() {
                        self.release_original(&application).await?;
                    }
                    self.get_application(application_id).await?
                } else {
                    application
                };

                tracing::info!(%application_id, %event_id, remaining = remaining.len(), "event withdrawn");
                self.notify_parties(Notice::EventWithdrawn {
                    application,
                    event: event.clone(),
                    by_employee: authority == Authority::Owner,
                })
                .await;
                Ok(EventWithdrawal::Removed(event))
            }
            Withdrawal::Request => {
                let reason = request
                    .reason
                    .unwrap_or_else(|| format!("Cancel arrangement on {}", event.requested_date));
                let tracking = self
                    .applications
                    .create(Application::cancel_one_request(
                        &application,
                        reason,
                        time::now(),
                    ))
                    .await?;
                self.events
                    .create(Event::marker_for(&event, tracking.id))
                    .await?;

                tracing::info!(%application_id, %event_id, tracking_id = %tracking.id, "event cancellation requested");
                self.notify_parties(Notice::EventCancelRequested {
                    application: tracking.clone(),
                    event,
                })
                .await;
                Ok(EventWithdrawal::CancelRequested(tracking))
            }
        }
    }

    /// Apply a manager's decision to a pending application.
    ///
    /// # Errors
    ///
    /// - [`LeaveHubError::NotFound`] when the application is missing
    /// - [`LeaveHubError::Validation`] with [`ValidationError::NotPending`]
    ///   when it was already decided, including by a concurrent caller
    /// - [`LeaveHubError::Forbidden`] when the caller is not the approver
    #[tracing::instrument(skip(self, decision), fields(application_id = %decision.application_id, outcome = %decision.outcome))]
    pub async fn approve_reject_pending_applications(
        &self,
        decision: Decision,
    ) -> Result<Application, LeaveHubError> {
        let application = self.get_application(decision.application_id).await?;
        if !application.is_pending() {
            return Err(ValidationError::NotPending.into());
        }
        if application.approver_id != Some(decision.approver_id) {
            return Err(ForbiddenError::NotApprover.into());
        }

        let (application, notice) = self
            .apply_decision(application, decision.outcome, decision.outcome_reason)
            .await?;
        if let Some(notice) = notice {
            self.notify_parties(notice).await;
        }
        Ok(application)
    }

    /// Reject every pending application whose earliest event is stale today.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the pending applications or their events
    /// cannot be loaded.
    pub async fn reject_old_applications(&self) -> Result<SweepReport, LeaveHubError> {
        self.reject_old_applications_as_of(time::today()).await
    }

    /// Reject every pending application whose earliest event lies more than
    /// [`STALE_AFTER_MONTHS`] before `today`.
    ///
    /// Each rejection goes through the same transition table as a manual
    /// decision. A failure on one application is logged and recorded in the
    /// report; the sweep carries on with the rest.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the pending applications or their events
    /// cannot be loaded.
    #[tracing::instrument(skip(self))]
    pub async fn reject_old_applications_as_of(
        &self,
        today: NaiveDate,
    ) -> Result<SweepReport, LeaveHubError> {
        let cutoff = time::sub_months(today, STALE_AFTER_MONTHS).unwrap_or(NaiveDate::MIN);
        let pending = self.applications.get_pending().await?;
        let ids = pending.iter().map(|application| application.id).collect();
        let events = self.events.find_by_application_ids(ids).await?;

        let mut earliest: HashMap<ApplicationId, NaiveDate> = HashMap::new();
        for event in &events {
            earliest
                .entry(event.application_id)
                .and_modify(|date| *date = (*date).min(event.requested_date))
                .or_insert(event.requested_date);
        }

        let mut report = SweepReport {
            examined: pending.len(),
            ..SweepReport::default()
        };

        for application in pending {
            let id = application.id;
            let stale = earliest.get(&id).is_some_and(|first| *first < cutoff);
            if !stale {
                continue;
            }
            if Transition::resolve(application.application_state, Outcome::Rejected)
                == Transition::NoOp
            {
                tracing::warn!(application_id = %id, "stale application has no request kind, left pending");
                continue;
            }

            match self
                .apply_decision(
                    application,
                    Outcome::Rejected,
                    Some(AUTO_REJECT_REASON.to_string()),
                )
                .await
            {
                Ok((application, _)) => {
                    report.rejected.push(id);
                    self.notify_owner(Notice::AutoRejected { application }).await;
                }
                Err(LeaveHubError::Validation(ValidationError::NotPending)) => {
                    tracing::debug!(application_id = %id, "decided before the sweep reached it");
                    report.skipped += 1;
                }
                Err(err) => {
                    tracing::error!(application_id = %id, error = %err, "failed to auto-reject application");
                    report.failed.push(id);
                }
            }
        }

        tracing::info!(
            %cutoff,
            examined = report.examined,
            rejected = report.rejected.len(),
            skipped = report.skipped,
            failed = report.failed.len(),
            "auto-rejection sweep finished"
        );
        Ok(report)
    }

    async fn insert_with_events(
        &self,
        application: Application,
        schedule: &Schedule,
        location: &str,
    ) -> Result<(Application, Vec<Event>), LeaveHubError> {
        let application = self.applications.create(application).await?;
        let events = expand_events(&self.events, application.id, schedule, location).await?;
        Ok((application, events))
    }

    async fn edit_pending(
        &self,
        mut application: Application,
        details: &ApplicationDetails,
        schedule: &Schedule,
    ) -> Result<Application, LeaveHubError> {
        application.apply_details(details, time::now());
        if !self.applications.update_pending(&application).await? {
            return Err(ValidationError::NotPending.into());
        }
        self.events.delete_by_application_id(application.id).await?;
        let events = expand_events(&self.events, application.id, schedule, &details.location).await?;

        tracing::info!(application_id = %application.id, events = events.len(), "pending application edited");
        self.notify_parties(Notice::Updated {
            application: application.clone(),
            events,
        })
        .await;
        Ok(application)
    }

    async fn request_change(
        &self,
        original: Application,
        details: &ApplicationDetails,
        schedule: &Schedule,
    ) -> Result<Application, LeaveHubError> {
        let mut proposed = Application::pending(
            original.staff_id,
            original.approver_id,
            ApplicationState::ChangeRequest,
            details,
            time::now(),
        );
        proposed.original_application_id = Some(original.id);
        let (proposed, proposed_events) = self
            .insert_with_events(proposed, schedule, &details.location)
            .await?;

        self.applications
            .update_state(
                original.id,
                Some(ApplicationState::ChangeRequest),
                Some(lifecycle::superseded_note(proposed.id)),
                ApplicationStatus::Superseded,
            )
            .await?;
        let original = self.get_application(original.id).await?;
        let original_events = self.events.find_by_application_id(original.id).await?;

        tracing::info!(original_id = %original.id, proposed_id = %proposed.id, "change requested");
        self.notify_parties(Notice::ChangeRequested {
            original,
            proposed: proposed.clone(),
            original_events,
            proposed_events,
        })
        .await;
        Ok(proposed)
    }

    /// Run the transition for `outcome` on a pending application.
    ///
    /// Returns the application as decided and the notice to send, if any.
    async fn apply_decision(
        &self,
        application: Application,
        outcome: Outcome,
        reason: Option<String>,
    ) -> Result<(Application, Option<Notice>), LeaveHubError> {
        match Transition::resolve(application.application_state, outcome) {
            Transition::NoOp => {
                tracing::warn!(application_id = %application.id, "no request kind recorded, decision ignored");
                Ok((application, None))
            }
            Transition::Decide(status) => {
                let application = self.claim(application.id, status, reason).await?;
                let notice = Notice::Decided {
                    application: application.clone(),
                };
                Ok((application, Some(notice)))
            }
            Transition::GrantCancellation | Transition::DenyCancellation => {
                let status = if outcome == Outcome::Approved {
                    ApplicationStatus::Withdrawn
                } else {
                    ApplicationStatus::Approved
                };
                let application = self.claim(application.id, status, reason).await?;
                let notice = Notice::CancelDecided {
                    application: application.clone(),
                    outcome,
                };
                Ok((application, Some(notice)))
            }
            Transition::ApproveChange | Transition::RejectChange => {
                self.decide_change(application, outcome, reason).await
            }
            Transition::ApproveCancelOne | Transition::RejectCancelOne => {
                self.decide_cancel_one(application, outcome, reason).await
            }
        }
    }

    async fn decide_change(
        &self,
        proposed: Application,
        outcome: Outcome,
        reason: Option<String>,
    ) -> Result<(Application, Option<Notice>), LeaveHubError> {
        let proposed = self.claim(proposed.id, outcome.status(), reason).await?;
        let Some(original_id) = proposed.original_application_id else {
            tracing::warn!(application_id = %proposed.id, "change request without original");
            return Ok((proposed, None));
        };

        match outcome {
            Outcome::Approved => {
                self.applications
                    .update_state(
                        original_id,
                        Some(ApplicationState::ChangeRequest),
                        Some(lifecycle::superseded_note(proposed.id)),
                        ApplicationStatus::Superseded,
                    )
                    .await?;
            }
            Outcome::Rejected => {
                self.applications
                    .update_state(
                        original_id,
                        None,
                        Some(lifecycle::change_rejected_note(proposed.id)),
                        ApplicationStatus::Approved,
                    )
                    .await?;
            }
        }

        let original = self.get_application(original_id).await?;
        let notice = Notice::ChangeDecided {
            original,
            proposed: proposed.clone(),
            outcome,
        };
        Ok((proposed, Some(notice)))
    }

    /// Settle a cancel-one request. The tracking record and its marker are
    /// deleted either way; approval also deletes the referenced event.
    async fn decide_cancel_one(
        &self,
        tracking: Application,
        outcome: Outcome,
        reason: Option<String>,
    ) -> Result<(Application, Option<Notice>), LeaveHubError> {
        let tracking = self.claim(tracking.id, outcome.status(), reason).await?;
        let markers = self.events.find_by_application_id(tracking.id).await?;

        if outcome == Outcome::Approved {
            for original_event in markers.iter().filter_map(|marker| marker.original_event_id) {
                self.events.delete(original_event).await?;
            }
        }
        self.events.delete_by_application_id(tracking.id).await?;
        self.applications.delete(tracking.id).await?;

        // Only an original that is still approved follows its last event out;
        // a record withdrawn or superseded in the meantime keeps its outcome.
        if outcome == Outcome::Approved
            && let Some(original_id) = tracking.original_application_id
            && self
                .applications
                .get_by_id(original_id)
                .await?
                .is_some_and(|original| original.status == ApplicationStatus::Approved)
            && self
                .events
                .find_first_by_application_id(original_id)
                .await?
                .is_none()
        {
            self.applications
                .update_status(
                    original_id,
                    ApplicationStatus::Withdrawn,
                    Some(ALL_EVENTS_WITHDRAWN.to_string()),
                )
                .await?;
            tracing::info!(application_id = %original_id, "last event cancelled, application withdrawn");
        }

        let notice = markers
            .into_iter()
            .next()
            .map(|event| Notice::CancelOneDecided {
                application: tracking.clone(),
                event,
                outcome,
            });
        Ok((tracking, notice))
    }

    /// Move a pending application to `status`, failing if somebody else got
    /// there first.
    async fn claim(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        reason: Option<String>,
    ) -> Result<Application, LeaveHubError> {
        let won = self
            .applications
            .compare_and_set_status(id, ApplicationStatus::Pending, status, reason)
            .await?;
        if !won {
            return Err(ValidationError::NotPending.into());
        }
        self.get_application(id).await
    }

    async fn has_pending_cancellation(&self, event_id: EventId) -> Result<bool, LeaveHubError> {
        for marker in self.events.find_by_original_event_id(event_id).await? {
            let tracking = self.applications.get_by_id(marker.application_id).await?;
            if tracking.is_some_and(|tracking| tracking.is_pending()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn has_pending_event_cancellations(
        &self,
        application_id: ApplicationId,
    ) -> Result<bool, LeaveHubError> {
        for event in self.events.find_by_application_id(application_id).await? {
            if self.has_pending_cancellation(event.id).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Hand the superseded original of a withdrawn change request back to
    /// `approved`.
    async fn release_original(&self, proposal: &Application) -> Result<(), LeaveHubError> {
        if proposal.application_state != Some(ApplicationState::ChangeRequest) {
            return Ok(());
        }
        let Some(original_id) = proposal.original_application_id else {
            return Ok(());
        };
        let superseded = self
            .applications
            .get_by_id(original_id)
            .await?
            .is_some_and(|original| original.status == ApplicationStatus::Superseded);
        if !superseded {
            return Ok(());
        }

        self.applications
            .update_state(
                original_id,
                None,
                Some(lifecycle::change_withdrawn_note(proposal.id)),
                ApplicationStatus::Approved,
            )
            .await?;
        tracing::info!(%original_id, proposed_id = %proposal.id, "change request withdrawn, original restored");
        Ok(())
    }

    async fn require_employee(
        &self,
        entity: &'static str,
        staff_id: StaffId,
    ) -> Result<Employee, LeaveHubError> {
        self.employees.get_by_id(staff_id).await?.ok_or_else(|| {
            NotFoundError {
                entity,
                id: staff_id.to_string(),
            }
            .into()
        })
    }

    /// Resolve the editor's authority over `application`.
    async fn authorize(
        &self,
        application: &Application,
        editor_id: StaffId,
    ) -> Result<Authority, LeaveHubError> {
        let editor = self.require_employee("Editor", editor_id).await?;
        let owner = self.require_employee("Employee", application.staff_id).await?;
        Authority::resolve(&owner, &editor).ok_or_else(|| ForbiddenError::NotOwnerOrManager.into())
    }

    /// Notify the owner and the approver of the notice's application.
    async fn notify_parties(&self, notice: Notice) {
        let application = notice.application();
        let mut ids = vec![application.staff_id];
        if let Some(approver) = application.approver_id
            && approver != application.staff_id
        {
            ids.push(approver);
        }
        let recipients = self.recipients(&ids).await;
        self.deliver(recipients, notice).await;
    }

    async fn notify_owner(&self, notice: Notice) {
        let recipients = self.recipients(&[notice.application().staff_id]).await;
        self.deliver(recipients, notice).await;
    }

    async fn recipients(&self, ids: &[StaffId]) -> Vec<Recipient> {
        let mut recipients = Vec::with_capacity(ids.len());
        for id in ids {
            match self.employees.get_by_id(*id).await {
                Ok(Some(employee)) => recipients.push(Recipient::from(&employee)),
                Ok(None) => tracing::warn!(staff_id = %id, "notification recipient not found"),
                Err(err) => {
                    tracing::warn!(staff_id = %id, error = %err, "failed to load notification recipient");
                }
            }
        }
        recipients
    }

    async fn deliver(&self, recipients: Vec<Recipient>, notice: Notice) {
        if recipients.is_empty() {
            tracing::warn!(subject = %notice.subject(), "notification has no recipients");
            return;
        }
        let subject = notice.subject();
        if !self.notifier.send(Notification { recipients, notice }).await {
            tracing::warn!(%subject, "notification not delivered");
        }
    }
}
