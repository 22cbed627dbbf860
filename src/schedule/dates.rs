//! Calendar boundary: epoch-millisecond timestamps in, local calendar
//! dates out. All malformed-timestamp handling lives here so the rule
//! evaluators can stay total over `NaiveDate`.

use chrono::{Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Convert an epoch-millisecond timestamp to the device's local calendar
/// date. Returns `None` for timestamps outside the representable range;
/// callers degrade to "not due" rather than failing (the condition is
/// logged here for visibility).
pub fn local_date_of_millis(millis: i64) -> Option<NaiveDate> {
    match Local.timestamp_millis_opt(millis) {
        LocalResult::Single(dt) => Some(dt.date_naive()),
        // DST fold: either side lands on the same calendar date in practice.
        LocalResult::Ambiguous(earliest, _) => Some(earliest.date_naive()),
        LocalResult::None => {
            tracing::warn!(millis, "timestamp does not map to a local date, record skipped");
            None
        }
    }
}

/// Epoch milliseconds of a local date at a given time-of-day. Used by the
/// repair helper and by tests that build timestamps from calendar dates.
pub fn millis_of_local(date: NaiveDate, time: NaiveTime) -> i64 {
    match date.and_time(time).and_local_timezone(Local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        // Spring-forward gap: midnight-ish times can be skipped; noon never is.
        LocalResult::None => date
            .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default())
            .and_local_timezone(Local)
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_default(),
    }
}

/// Whole calendar days from `start` to `date`; negative when `date`
/// precedes `start`.
pub fn days_between(start: NaiveDate, date: NaiveDate) -> i64 {
    (date - start).num_days()
}
