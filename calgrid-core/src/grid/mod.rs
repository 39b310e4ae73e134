//! Calendar grid math for the month and week views.
//!
//! All arithmetic is done on calendar-local `NaiveDate`s; nothing here
//! touches UTC, so a grid never shifts by a day across timezones.

mod month;
mod week;

pub use month::{CellPosition, GRID_CELLS, MonthCell, MonthGrid, days_in_month, month_grid};
pub use week::{TimeMarker, current_time_marker, is_past, is_weekend, week_dates};

use chrono::{Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::event::{Event, parse_date};

pub const DAYS_PER_WEEK: usize = 7;

/// Which grid the calendar is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

/// Move the reference date by `delta` periods of the view: calendar months
/// for the month view (day clamped to the month's end), 7 days for the week view.
pub fn shift_period(date: NaiveDate, view: ViewMode, delta: i32) -> Option<NaiveDate> {
    match view {
        ViewMode::Month => {
            let months = Months::new(delta.unsigned_abs());
            if delta >= 0 {
                date.checked_add_months(months)
            } else {
                date.checked_sub_months(months)
            }
        }
        ViewMode::Week => date.checked_add_signed(TimeDelta::weeks(delta as i64)),
    }
}

/// Events on `date`, in snapshot order. Events with an unreadable date are skipped.
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| parse_date(&event.date).is_ok_and(|d| d == date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::make_event;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_month() {
        assert_eq!(shift_period(ymd(2024, 1, 15), ViewMode::Month, 1), Some(ymd(2024, 2, 15)));
        assert_eq!(shift_period(ymd(2024, 1, 15), ViewMode::Month, -1), Some(ymd(2023, 12, 15)));
        // clamped to the end of a shorter month
        assert_eq!(shift_period(ymd(2024, 1, 31), ViewMode::Month, 1), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_shift_week() {
        assert_eq!(shift_period(ymd(2024, 1, 29), ViewMode::Week, 1), Some(ymd(2024, 2, 5)));
        assert_eq!(shift_period(ymd(2024, 1, 3), ViewMode::Week, -1), Some(ymd(2023, 12, 27)));
    }

    #[test]
    fn test_events_on() {
        let events = vec![
            make_event(1, "2024-01-10", "10:00", "11:00"),
            make_event(2, "2024-01-11", "10:00", "11:00"),
            make_event(3, "2024-01-10T00:00:00.000Z", "12:00", "13:00"),
            make_event(4, "garbage", "12:00", "13:00"),
        ];
        let ids: Vec<_> = events_on(&events, ymd(2024, 1, 10)).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_view_mode_serde() {
        assert_eq!(serde_json::to_string(&ViewMode::Week).unwrap(), "\"week\"");
    }
}
