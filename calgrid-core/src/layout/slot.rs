//! Which hour row an event is drawn in.
//!
//! An event is drawn once, in the row of the hour it starts in, and overflows
//! downwards through its height instead of being repeated in every hour it covers.

use chrono::NaiveDate;

use crate::event::EventSpan;

pub const HOURS_PER_DAY: u32 = 24;

/// Hour row an event is anchored to.
pub fn anchor_hour(span: &EventSpan) -> u32 {
    span.start_hour()
}

/// Whether an event starts in `hour` on `day`.
pub fn is_in_slot(span: &EventSpan, day: NaiveDate, hour: u32) -> bool {
    span.date == day && anchor_hour(span) == hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::make_event;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn hours_of(date: &str, time: &str, end_time: &str) -> Vec<u32> {
        let span = make_event(1, date, time, end_time).span().unwrap();
        (0..HOURS_PER_DAY).filter(|&hour| is_in_slot(&span, day(), hour)).collect()
    }

    #[test]
    fn test_anchored_to_start_hour_only() {
        assert_eq!(hours_of("2024-01-10", "09:30", "11:15"), vec![9]);
    }

    #[test]
    fn test_hour_boundary_belongs_to_that_hour() {
        assert_eq!(hours_of("2024-01-10", "10:00", "10:30"), vec![10]);
        assert_eq!(hours_of("2024-01-10", "23:59", "24:00"), vec![23]);
    }

    #[test]
    fn test_other_dates_excluded() {
        assert!(hours_of("2024-01-11", "10:00", "10:30").is_empty());
        assert!(hours_of("2024-01-09", "23:00", "24:00").is_empty());
    }
}
