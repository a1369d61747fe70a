//! Time and calendar helpers.

use chrono::{DateTime, Months, NaiveDate, Utc};

/// UTC timestamp used for `created_on`, `last_updated_on`, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return today's date in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Add calendar months, clamping to the last day of shorter months.
///
/// Returns `None` only when the result falls outside chrono's date range.
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Subtract calendar months, clamping to the last day of shorter months.
#[must_use]
pub fn sub_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(months))
}
