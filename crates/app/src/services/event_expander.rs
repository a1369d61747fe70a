//! Event expander — materializes a schedule as stored events.

use leavehub_domain::error::LeaveHubError;
use leavehub_domain::event::Event;
use leavehub_domain::id::ApplicationId;
use leavehub_domain::schedule::Schedule;

use crate::ports::EventRepository;

/// Writes one event per occurrence of `schedule`, in occurrence order.
///
/// Each occurrence is persisted with its own `create` call as it is
/// produced; a storage failure stops the expansion and leaves the events
/// written so far in place.
///
/// # Errors
///
/// Propagates the first storage error from the repository.
#[tracing::instrument(skip(repo, schedule, location))]
pub async fn expand_events<R: EventRepository>(
    repo: &R,
    application_id: ApplicationId,
    schedule: &Schedule,
    location: &str,
) -> Result<Vec<Event>, LeaveHubError> {
    let mut events = Vec::new();
    for slot in schedule.occurrences() {
        let event = repo.create(Event::new(application_id, slot, location)).await?;
        events.push(event);
    }
    tracing::debug!(count = events.len(), "events materialized");
    Ok(events)
}
