//! Week enumeration and the current-time marker.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::layout::geometry::RowGeometry;

/// The Sunday-to-Saturday week containing `date`.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let offset = date.weekday().num_days_from_sunday() as u64;
    let sunday = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    sunday.iter_days().take(super::DAYS_PER_WEEK).collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whether `hour:minute` on `date` is already behind `now`.
pub fn is_past(date: NaiveDate, hour: u32, minute: u32, now: NaiveDateTime) -> bool {
    date.and_hms_opt(hour, minute, 0).is_some_and(|at| at < now)
}

/// Position of the "now" line in the week grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMarker {
    /// Column of today within the week, Sunday = 0
    pub day_index: usize,
    /// Distance from the top of the day column
    pub offset_px: f64,
}

/// The "now" marker, or None when `now` falls outside the displayed week.
pub fn current_time_marker(week: &[NaiveDate], now: NaiveDateTime, geometry: RowGeometry) -> Option<TimeMarker> {
    let today = now.date();
    let day_index = week.iter().position(|&d| d == today)?;

    Some(TimeMarker {
        day_index,
        offset_px: geometry.clock_offset_px(now.hour(), now.minute()),
    })
}
