//! Event — one concrete dated occurrence of an application.
//!
//! Every application owns one or more events. A cancel-one request owns a
//! single *marker* event whose `original_event_id` names the occurrence the
//! employee wants removed from the original application.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{ApplicationId, EventId};
use crate::schedule::{ApplicationHour, DateSlot};

/// A single dated occurrence belonging to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub application_id: ApplicationId,
    pub requested_date: NaiveDate,
    pub application_hour: ApplicationHour,
    pub location: String,
    pub original_event_id: Option<EventId>,
}

impl Event {
    /// Materialize one occurrence of an application's schedule.
    #[must_use]
    pub fn new(application_id: ApplicationId, slot: DateSlot, location: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            application_id,
            requested_date: slot.date,
            application_hour: slot.hour,
            location: location.into(),
            original_event_id: None,
        }
    }

    /// Build the marker a cancel-one request owns for `original`.
    #[must_use]
    pub fn marker_for(original: &Event, tracking_application: ApplicationId) -> Self {
        Self {
            id: EventId::new(),
            application_id: tracking_application,
            requested_date: original.requested_date,
            application_hour: original.application_hour,
            location: original.location.clone(),
            original_event_id: Some(original.id),
        }
    }

    #[must_use]
    pub fn slot(&self) -> DateSlot {
        DateSlot::new(self.requested_date, self.application_hour)
    }
}

/// Earliest requested date among `events`, if any.
#[must_use]
pub fn earliest_date<'a>(events: impl IntoIterator<Item = &'a Event>) -> Option<NaiveDate> {
    events.into_iter().map(|e| e.requested_date).min()
}
