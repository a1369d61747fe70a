//! Event repository port — persistence for the dated occurrences of applications.

use std::future::Future;

use leavehub_domain::error::LeaveHubError;
use leavehub_domain::event::Event;
use leavehub_domain::id::{ApplicationId, EventId};

/// Repository for persisting and querying [`Event`]s.
pub trait EventRepository {
    /// Persist a new event.
    fn create(&self, event: Event) -> impl Future<Output = Result<Event, LeaveHubError>> + Send;

    /// Get an event by its unique identifier.
    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, LeaveHubError>> + Send;

    /// Events of one application, ordered by date.
    fn find_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> impl Future<Output = Result<Vec<Event>, LeaveHubError>> + Send;

    /// Events of several applications at once, ordered by date.
    fn find_by_application_ids(
        &self,
        application_ids: Vec<ApplicationId>,
    ) -> impl Future<Output = Result<Vec<Event>, LeaveHubError>> + Send;

    /// Earliest event of an application.
    fn find_first_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> impl Future<Output = Result<Option<Event>, LeaveHubError>> + Send;

    /// Markers pointing back at `original_event_id`.
    fn find_by_original_event_id(
        &self,
        original_event_id: EventId,
    ) -> impl Future<Output = Result<Vec<Event>, LeaveHubError>> + Send;

    /// Delete a single event.
    fn delete(&self, id: EventId) -> impl Future<Output = Result<(), LeaveHubError>> + Send;

    /// Delete every event of an application.
    fn delete_by_application_id(
        &self,
        application_id: ApplicationId,
    ) -> impl Future<Output = Result<(), LeaveHubError>> + Send;
}
