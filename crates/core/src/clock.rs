//! Local wall-clock helpers.
//!
//! Every timestamp in the engine is a [`NaiveDateTime`]: a calendar date
//! combined with a time of day, with no time zone attached. Arithmetic never
//! leaves that representation, so a job booked for 08:00 stays at 08:00
//! regardless of where the snapshot is evaluated.

use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{ScheduleError, ScheduleResult};

/// Wire format of calendar dates (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years a parsed date may fall in. Keeps all later arithmetic far from the
/// limits of [`NaiveDate`].
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Parses a `yyyy-MM-dd` calendar date within [`SUPPORTED_YEARS`].
pub fn parse_date(value: &str) -> ScheduleResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ScheduleError::InvalidDate(format!("{value:?}: {e}")))?;
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return Err(ScheduleError::InvalidDate(format!(
            "{value:?}: year {} is out of range",
            date.year()
        )));
    }
    Ok(date)
}

/// Parses an `HH:mm` clock time. `HH:mm:ss` is accepted as well since some
/// upstream feeds append seconds.
pub fn parse_time(value: &str) -> ScheduleResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| ScheduleError::InvalidTime(format!("{value:?}: {e}")))
}

/// Builds a clock time from whole hours and minutes.
///
/// Callers only pass compile-time constants, so an out-of-range value falls
/// back to midnight instead of panicking.
pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Combines a date and a time of day into a local timestamp.
pub fn at(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Half-open bounds `[00:00, next day 00:00)` of a calendar day. On the last
/// representable day the end saturates at [`NaiveDateTime::MAX`].
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = at(date, NaiveTime::MIN);
    let end = start
        .checked_add_signed(Duration::days(1))
        .unwrap_or(NaiveDateTime::MAX);
    (start, end)
}

/// Signed length of `[start, end)` in fractional hours.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / SECONDS_PER_HOUR
}

/// Shifts a timestamp by a (possibly fractional) number of hours.
///
/// A shift that is not finite or would leave the representable range leaves
/// the timestamp unchanged.
pub fn add_hours(timestamp: NaiveDateTime, hours: f64) -> NaiveDateTime {
    if !hours.is_finite() {
        return timestamp;
    }
    Duration::try_seconds((hours * SECONDS_PER_HOUR).round() as i64)
        .and_then(|delta| timestamp.checked_add_signed(delta))
        .unwrap_or(timestamp)
}

/// Number of calendar days touched by `[first, last]`, counting both ends.
pub fn days_spanned(first: NaiveDate, last: NaiveDate) -> i64 {
    (last - first).num_days() + 1
}

/// Calendar day an exclusive end timestamp belongs to: an end at exactly
/// midnight closes the previous day.
pub fn last_occupied_day(end: NaiveDateTime) -> NaiveDate {
    if end.time() == NaiveTime::MIN {
        end.date().pred_opt().unwrap_or(end.date())
    } else {
        end.date()
    }
}
