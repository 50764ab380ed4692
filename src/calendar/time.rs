use crate::error::{schedule_error, AppResult};
use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Local date-time format sent to the calendar API alongside the time zone
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Length of every created event
pub const EVENT_LENGTH_HOURS: i64 = 1;

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse date string in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// Start and end of an event in local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EventWindow {
    pub fn start_string(&self) -> String {
        self.start.format(LOCAL_DATE_TIME_FORMAT).to_string()
    }

    pub fn end_string(&self) -> String {
        self.end.format(LOCAL_DATE_TIME_FORMAT).to_string()
    }
}

/// Compute the one-hour window starting at `date` `time` in `tz`.
///
/// The end rolls over to the next day when the start is within the last hour
/// of the day.
pub fn event_window(date: &str, time: &str, tz: Tz) -> AppResult<EventWindow> {
    let day = parse_date(date).ok_or_else(|| schedule_error(&format!("Invalid event date: {}", date)))?;
    let (hour, minute) =
        parse_time(time).ok_or_else(|| schedule_error(&format!("Invalid event time: {}", time)))?;

    let start = day
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| schedule_error(&format!("Invalid event time: {}", time)))?;

    let end = start
        .checked_add_signed(Duration::hours(EVENT_LENGTH_HOURS))
        .ok_or_else(|| schedule_error("Event end is out of range"))?;

    ensure_exists(start, tz)?;
    ensure_exists(end, tz)?;

    Ok(EventWindow { start, end })
}

/// Reject local times skipped by a DST transition
fn ensure_exists(local: NaiveDateTime, tz: Tz) -> AppResult<()> {
    if tz.from_local_datetime(&local).earliest().is_none() {
        return Err(schedule_error(&format!(
            "Event time {} does not exist in time zone {}",
            local.format(LOCAL_DATE_TIME_FORMAT),
            tz
        )));
    }
    Ok(())
}
