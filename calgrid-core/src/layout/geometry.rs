//! Time-to-pixel mapping inside a fixed-height hour row.

use crate::event::{EventSpan, MINUTES_PER_HOUR};

/// Row height used by the week grid unless configured otherwise.
pub const DEFAULT_ROW_HEIGHT_PX: f64 = 64.0;

/// Height (and overlap extent) given to events whose end is not after their start.
pub const MIN_VISIBLE_MINUTES: u32 = 15;

/// Pixel scale of one hour row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub row_height_px: f64,
}

impl Default for RowGeometry {
    fn default() -> Self {
        RowGeometry {
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
        }
    }
}

impl RowGeometry {
    pub fn new(row_height_px: f64) -> Self {
        RowGeometry { row_height_px }
    }

    pub fn minutes_to_px(&self, minutes: f64) -> f64 {
        minutes * self.row_height_px / MINUTES_PER_HOUR as f64
    }

    /// Offset of a wall-clock time from the top of the day column.
    pub fn clock_offset_px(&self, hour: u32, minute: u32) -> f64 {
        hour as f64 * self.row_height_px + (minute as f64 / MINUTES_PER_HOUR as f64) * self.row_height_px
    }
}

/// Vertical placement of one event inside its anchor row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub top_offset_minutes: u32,
    pub height_minutes: u32,
    pub top_px: f64,
    pub height_px: f64,
    /// The event runs past the one-row cap
    pub truncated: bool,
}

/// End minute used for height and overlap tests. Malformed spans get `MIN_VISIBLE_MINUTES`.
pub fn effective_end_minutes(span: &EventSpan) -> u32 {
    if span.is_malformed() {
        span.start_minutes + MIN_VISIBLE_MINUTES
    } else {
        span.end_minutes
    }
}

/// Place an event inside the row of `hour`. Height is capped at one row.
pub fn slot_geometry(span: &EventSpan, hour: u32, geometry: RowGeometry) -> SlotGeometry {
    let slot_start = hour * MINUTES_PER_HOUR;
    let top_offset_minutes = span.start_minutes.saturating_sub(slot_start);
    let duration = effective_end_minutes(span) - span.start_minutes;
    let height_minutes = duration.min(MINUTES_PER_HOUR);

    SlotGeometry {
        top_offset_minutes,
        height_minutes,
        top_px: geometry.minutes_to_px(top_offset_minutes as f64),
        height_px: geometry.minutes_to_px(height_minutes as f64),
        truncated: duration > MINUTES_PER_HOUR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn span(start: u32, end: u32) -> EventSpan {
        EventSpan {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            start_minutes: start,
            end_minutes: end,
        }
    }

    #[test]
    fn test_on_the_hour() {
        let g = slot_geometry(&span(9 * 60, 9 * 60 + 45), 9, RowGeometry::default());
        assert_eq!(g.top_offset_minutes, 0);
        assert_eq!(g.height_minutes, 45);
        assert_eq!(g.top_px, 0.0);
        assert_eq!(g.height_px, 48.0);
        assert!(!g.truncated);
    }

    #[test]
    fn test_mid_hour_start() {
        let g = slot_geometry(&span(10 * 60 + 30, 11 * 60), 10, RowGeometry::default());
        assert_eq!(g.top_offset_minutes, 30);
        assert_eq!(g.top_px, 32.0);
        assert_eq!(g.height_px, 32.0);
    }

    #[test]
    fn test_long_event_is_capped() {
        let g = slot_geometry(&span(14 * 60, 15 * 60 + 30), 14, RowGeometry::default());
        assert_eq!(g.height_minutes, 60);
        assert_eq!(g.height_px, 64.0);
        assert!(g.truncated);
    }

    #[test]
    fn test_malformed_event_gets_minimum_height() {
        let backwards = span(11 * 60, 10 * 60);
        let zero = span(11 * 60, 11 * 60);
        for s in [backwards, zero] {
            let g = slot_geometry(&s, 11, RowGeometry::default());
            assert_eq!(g.height_minutes, MIN_VISIBLE_MINUTES);
            assert!(g.height_px > 0.0);
        }
        assert_eq!(effective_end_minutes(&backwards), 11 * 60 + MIN_VISIBLE_MINUTES);
    }

    #[test]
    fn test_custom_row_height() {
        let g = slot_geometry(&span(8 * 60 + 15, 8 * 60 + 45), 8, RowGeometry::new(120.0));
        assert_eq!(g.top_px, 30.0);
        assert_eq!(g.height_px, 60.0);
    }

    #[test]
    fn test_clock_offset() {
        let g = RowGeometry::default();
        assert_eq!(g.clock_offset_px(0, 0), 0.0);
        assert_eq!(g.clock_offset_px(13, 30), 13.0 * 64.0 + 32.0);
    }
}
