//! Schedules — the dates an application asks for, and their expansion into
//! concrete occurrences.
//!
//! A schedule is either a single date, an explicit list of dates, or a
//! recurring series bounded by an inclusive end date. Recurring occurrences
//! are computed from the start date (`start + n * unit`) rather than by
//! chaining steps, so a monthly series anchored on the 31st clamps to the end
//! of shorter months without drifting.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::add_months;

text_enum!(
    /// Part of the day covered by an event.
    ApplicationHour {
        Am => "AM",
        Pm => "PM",
        FullDay => "FULLDAY",
    }
);

text_enum!(
    /// Step between occurrences of a recurring application.
    RecurrenceType {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
);

impl RecurrenceType {
    /// The `n`-th occurrence counted from `start` (`n = 0` is `start` itself).
    #[must_use]
    pub fn nth_from(self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::Daily => start.checked_add_days(Days::new(u64::from(n))),
            Self::Weekly => start.checked_add_days(Days::new(7 * u64::from(n))),
            Self::Monthly => add_months(start, n),
        }
    }
}

/// One requested date and the part of the day it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSlot {
    pub date: NaiveDate,
    pub hour: ApplicationHour,
}

impl DateSlot {
    #[must_use]
    pub fn new(date: NaiveDate, hour: ApplicationHour) -> Self {
        Self { date, hour }
    }
}

/// Validated shape of the dates an application covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    Single(DateSlot),
    /// Explicit dates, kept in the order the applicant supplied them.
    Multiple(Vec<DateSlot>),
    Recurring {
        start: DateSlot,
        recurrence: RecurrenceType,
        end: NaiveDate,
    },
}

impl Schedule {
    /// Iterate over every dated occurrence of this schedule.
    #[must_use]
    pub fn occurrences(&self) -> Occurrences<'_> {
        Occurrences {
            schedule: self,
            index: 0,
        }
    }
}

/// Iterator returned by [`Schedule::occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    schedule: &'a Schedule,
    index: u32,
}

impl Iterator for Occurrences<'_> {
    type Item = DateSlot;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = match self.schedule {
            Schedule::Single(slot) => (self.index == 0).then_some(*slot),
            Schedule::Multiple(slots) => usize::try_from(self.index)
                .ok()
                .and_then(|i| slots.get(i))
                .copied(),
            Schedule::Recurring {
                start,
                recurrence,
                end,
            } => recurrence
                .nth_from(start.date, self.index)
                .filter(|date| date <= end)
                .map(|date| DateSlot::new(date, start.hour)),
        }?;
        self.index += 1;
        Some(slot)
    }
}
