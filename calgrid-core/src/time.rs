//! Small wall-clock helpers used when drafting events.

use chrono::{NaiveTime, Timelike};

use crate::error::CalGridResult;
use crate::event::{MINUTES_PER_DAY, MINUTES_PER_HOUR, format_clock, parse_clock};

/// Granularity new events snap to.
pub const QUARTER_MINUTES: u32 = 15;

/// Floor the minutes to a multiple of 15 and drop seconds.
pub fn round_to_quarter(time: NaiveTime) -> NaiveTime {
    let minute = time.minute() / QUARTER_MINUTES * QUARTER_MINUTES;
    time.with_minute(minute)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Suggested start for a new event: `now` floored to the quarter, as `HH:MM`.
pub fn default_start_time(now: NaiveTime) -> String {
    round_to_quarter(now).format("%H:%M").to_string()
}

/// Suggested end for a new event: one hour after `start`, wrapping past midnight.
pub fn default_end_time(start: &str) -> CalGridResult<String> {
    let start = parse_clock(start)?;
    Ok(format_clock((start + MINUTES_PER_HOUR) % MINUTES_PER_DAY))
}
