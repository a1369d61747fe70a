//! Application repository port — persistence for applications.

use std::future::Future;

use leavehub_domain::application::{Application, ApplicationState, ApplicationStatus};
use leavehub_domain::error::LeaveHubError;
use leavehub_domain::id::{ApplicationId, StaffId};

/// Repository for persisting and querying [`Application`]s.
///
/// Status writes that depend on the current status go through
/// [`compare_and_set_status`](Self::compare_and_set_status) so that two
/// concurrent decisions on the same record cannot both succeed.
pub trait ApplicationRepository {
    /// Persist a new application.
    fn create(
        &self,
        application: Application,
    ) -> impl Future<Output = Result<Application, LeaveHubError>> + Send;

    /// Get an application by its unique identifier.
    fn get_by_id(
        &self,
        id: ApplicationId,
    ) -> impl Future<Output = Result<Option<Application>, LeaveHubError>> + Send;

    /// Applications owned by `staff_id`, newest first.
    fn find_by_staff_id(
        &self,
        staff_id: StaffId,
    ) -> impl Future<Output = Result<Vec<Application>, LeaveHubError>> + Send;

    /// Applications awaiting (or decided by) `approver_id`, newest first.
    fn find_by_approver_id(
        &self,
        approver_id: StaffId,
    ) -> impl Future<Output = Result<Vec<Application>, LeaveHubError>> + Send;

    /// Applications currently in `status`, newest first.
    fn find_by_status(
        &self,
        status: ApplicationStatus,
    ) -> impl Future<Output = Result<Vec<Application>, LeaveHubError>> + Send;

    /// Applications still awaiting a decision.
    fn get_pending(&self) -> impl Future<Output = Result<Vec<Application>, LeaveHubError>> + Send {
        self.find_by_status(ApplicationStatus::Pending)
    }

    /// Overwrite the descriptive and recurrence fields of an application that
    /// is still `pending`. Status, state and outcome are left alone.
    ///
    /// Returns `false` when the application is no longer pending.
    fn update_pending(
        &self,
        application: &Application,
    ) -> impl Future<Output = Result<bool, LeaveHubError>> + Send;

    /// Set status and outcome reason unconditionally.
    fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        outcome_reason: Option<String>,
    ) -> impl Future<Output = Result<(), LeaveHubError>> + Send;

    /// Set state flag, outcome reason and status in one write.
    fn update_state(
        &self,
        id: ApplicationId,
        state: Option<ApplicationState>,
        outcome_reason: Option<String>,
        status: ApplicationStatus,
    ) -> impl Future<Output = Result<(), LeaveHubError>> + Send;

    /// Move from `expected` to `status` only if the record is still `expected`.
    ///
    /// Returns `false` when another writer changed the status first.
    fn compare_and_set_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        status: ApplicationStatus,
        outcome_reason: Option<String>,
    ) -> impl Future<Output = Result<bool, LeaveHubError>> + Send;

    /// Delete an application. Its events must already be gone.
    fn delete(&self, id: ApplicationId) -> impl Future<Output = Result<(), LeaveHubError>> + Send;
}
