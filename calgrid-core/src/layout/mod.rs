//! Week-view layout engine.
//!
//! A layout pass takes a snapshot of events and a day (or the week around a
//! day) and produces, for each hour row, the events anchored there with their
//! vertical geometry and lane. Passes are pure: nothing is cached between
//! calls, and the same snapshot always produces the same layout.

pub mod geometry;
pub mod lanes;
pub mod slot;

use chrono::NaiveDate;

use crate::event::{Event, EventSpan, parse_date};
use crate::grid::week_dates;
use geometry::{RowGeometry, effective_end_minutes, slot_geometry};
use lanes::{Interval, assign_lanes};
use slot::{HOURS_PER_DAY, is_in_slot};

pub use geometry::{DEFAULT_ROW_HEIGHT_PX, MIN_VISIBLE_MINUTES};

/// One event placed in its anchor row.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry<'a> {
    pub event: &'a Event,
    pub span: EventSpan,
    pub top_offset_minutes: u32,
    pub height_minutes: u32,
    pub top_px: f64,
    pub height_px: f64,
    pub lane_index: usize,
    pub lane_count: usize,
    pub overlap_count: usize,
    /// Event continues past the bottom of its row
    pub truncated: bool,
}

impl LayoutEntry<'_> {
    /// Share of the row width this entry gets.
    pub fn width_fraction(&self) -> f64 {
        1.0 / self.lane_count as f64
    }

    /// Left edge as a share of the row width.
    pub fn left_fraction(&self) -> f64 {
        self.lane_index as f64 / self.lane_count as f64
    }
}

/// Entries anchored to one hour row.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotLayout<'a> {
    pub hour: u32,
    pub entries: Vec<LayoutEntry<'a>>,
}

/// An event left out of the layout because its date or time could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEvent<'a> {
    pub event: &'a Event,
    pub reason: String,
}

/// Layout of a single day: always 24 slots, hour 0 first.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    pub slots: Vec<SlotLayout<'a>>,
    pub rejected: Vec<RejectedEvent<'a>>,
}

impl<'a> DayLayout<'a> {
    pub fn slot(&self, hour: u32) -> Option<&SlotLayout<'a>> {
        self.slots.get(hour as usize)
    }

    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry<'a>> {
        self.slots.iter().flat_map(|slot| slot.entries.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.entries.is_empty())
    }
}

/// Layout of the Sunday-to-Saturday week around a reference date.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout<'a> {
    pub days: Vec<DayLayout<'a>>,
    /// Rejected events relevant to any day of the week, reported once
    pub rejected: Vec<RejectedEvent<'a>>,
}

impl WeekLayout<'_> {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }
}

/// Lay out the events of `day` into hour rows.
pub fn layout_day(events: &[Event], day: NaiveDate, geometry: RowGeometry) -> DayLayout<'_> {
    let (parsed, rejected) = parse_snapshot(events);
    let rejected = rejected
        .into_iter()
        .filter(|r| concerns_any(r.event, &[day]))
        .collect();

    DayLayout {
        rejected,
        ..layout_parsed(&parsed, day, geometry)
    }
}

/// Lay out the seven days of the week containing `reference`.
pub fn layout_week(events: &[Event], reference: NaiveDate, geometry: RowGeometry) -> WeekLayout<'_> {
    let dates = week_dates(reference);
    let (parsed, rejected) = parse_snapshot(events);

    let days = dates
        .iter()
        .map(|&date| layout_parsed(&parsed, date, geometry))
        .collect();
    let rejected = rejected
        .into_iter()
        .filter(|r| concerns_any(r.event, &dates))
        .collect();

    WeekLayout { days, rejected }
}

/// Parse every event once; failures are isolated to the event that failed.
fn parse_snapshot(events: &[Event]) -> (Vec<(&Event, EventSpan)>, Vec<RejectedEvent<'_>>) {
    let mut parsed = Vec::with_capacity(events.len());
    let mut rejected = Vec::new();

    for event in events {
        match event.span() {
            Ok(span) => parsed.push((event, span)),
            Err(err) => {
                tracing::warn!(event_id = event.id, title = %event.title, error = %err, "Skipping event in layout");
                rejected.push(RejectedEvent {
                    event,
                    reason: err.to_string(),
                });
            }
        }
    }

    (parsed, rejected)
}

/// A rejected event belongs to a view when its date is one of the view's
/// dates or its date is unreadable.
fn concerns_any(event: &Event, dates: &[NaiveDate]) -> bool {
    match parse_date(&event.date) {
        Ok(date) => dates.contains(&date),
        Err(_) => true,
    }
}

fn layout_parsed<'a>(parsed: &[(&'a Event, EventSpan)], day: NaiveDate, geometry: RowGeometry) -> DayLayout<'a> {
    let slots = (0..HOURS_PER_DAY)
        .map(|hour| {
            let bucket: Vec<(&'a Event, EventSpan)> = parsed
                .iter()
                .copied()
                .filter(|(_, span)| is_in_slot(span, day, hour))
                .collect();
            layout_slot(hour, &bucket, geometry)
        })
        .collect();

    DayLayout {
        date: day,
        slots,
        rejected: Vec::new(),
    }
}

fn layout_slot<'a>(hour: u32, bucket: &[(&'a Event, EventSpan)], geometry: RowGeometry) -> SlotLayout<'a> {
    let intervals: Vec<Interval> = bucket
        .iter()
        .map(|(_, span)| Interval::new(span.start_minutes, effective_end_minutes(span)))
        .collect();

    let entries = bucket
        .iter()
        .zip(assign_lanes(&intervals))
        .map(|(&(event, span), lanes)| {
            let placed = slot_geometry(&span, hour, geometry);
            LayoutEntry {
                event,
                span,
                top_offset_minutes: placed.top_offset_minutes,
                height_minutes: placed.height_minutes,
                top_px: placed.top_px,
                height_px: placed.height_px,
                lane_index: lanes.lane_index,
                lane_count: lanes.lane_count,
                overlap_count: lanes.overlap_count,
                truncated: placed.truncated,
            }
        })
        .collect();

    SlotLayout { hour, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::make_event;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn entry_lanes(layout: &DayLayout, hour: u32) -> Vec<(u64, usize, usize)> {
        layout
            .slot(hour)
            .unwrap()
            .entries
            .iter()
            .map(|e| (e.event.id, e.lane_index, e.lane_count))
            .collect()
    }

    #[test]
    fn test_day_has_24_slots() {
        let layout = layout_day(&[], day(), RowGeometry::default());
        assert_eq!(layout.slots.len(), 24);
        assert!(layout.is_empty());
        assert_eq!(layout.slots[23].hour, 23);
    }

    #[test]
    fn test_non_overlapping_day() {
        let events = vec![
            make_event(1, "2024-01-10", "09:00", "09:45"),
            make_event(2, "2024-01-10", "10:00", "11:00"),
            make_event(3, "2024-01-10", "13:30", "14:00"),
        ];
        let layout = layout_day(&events, day(), RowGeometry::default());

        assert_eq!(layout.entries().count(), 3);
        assert!(layout.entries().all(|e| e.lane_index == 0 && e.lane_count == 1));
    }

    #[test]
    fn test_overlapping_pair() {
        let events = vec![
            make_event(1, "2024-01-10", "10:00", "11:00"),
            make_event(2, "2024-01-10", "10:30", "11:30"),
        ];
        let layout = layout_day(&events, day(), RowGeometry::default());
        assert_eq!(entry_lanes(&layout, 10), vec![(1, 0, 2), (2, 1, 2)]);
        assert!(layout.slot(11).unwrap().entries.is_empty());

        let second = &layout.slot(10).unwrap().entries[1];
        assert_eq!(second.top_offset_minutes, 30);
        assert_eq!(second.left_fraction(), 0.5);
        assert_eq!(second.width_fraction(), 0.5);
    }

    #[test]
    fn test_single_slot_geometry() {
        let events = vec![make_event(1, "2024-01-10", "09:00", "09:45")];
        let layout = layout_day(&events, day(), RowGeometry::default());

        for slot in &layout.slots {
            assert_eq!(slot.entries.len(), usize::from(slot.hour == 9));
        }
        let entry = &layout.slot(9).unwrap().entries[0];
        assert_eq!(entry.top_offset_minutes, 0);
        assert_eq!(entry.height_minutes, 45);
    }

    #[test]
    fn test_other_day_never_appears() {
        let events = vec![make_event(1, "2024-01-11", "10:00", "11:00")];
        let layout = layout_day(&events, day(), RowGeometry::default());
        assert!(layout.is_empty());
        assert!(layout.rejected.is_empty());
    }

    #[test]
    fn test_unparseable_event_is_isolated() {
        let events = vec![
            make_event(1, "2024-01-10", "10:00", "11:00"),
            make_event(2, "2024-01-10", "10:xx", "11:00"),
            make_event(3, "not-a-date", "10:00", "11:00"),
            make_event(4, "2024-01-12", "bad", "bad"),
            make_event(5, "2024-01-10", "10:15", "10:45"),
            make_event(6, "2024-01-10", "+9:00", "10:00"),
            make_event(7, "2024-01-10", "10:00", "10:+5"),
        ];
        let layout = layout_day(&events, day(), RowGeometry::default());

        assert_eq!(entry_lanes(&layout, 10), vec![(1, 0, 2), (5, 1, 2)]);
        assert!(layout.slot(9).unwrap().entries.is_empty());
        let rejected: Vec<_> = layout.rejected.iter().map(|r| r.event.id).collect();
        assert_eq!(rejected, vec![2, 3, 6, 7]);
        assert!(layout.rejected[0].reason.contains("10:xx"));
    }

    #[test]
    fn test_malformed_event_still_rendered() {
        let events = vec![
            make_event(1, "2024-01-10", "15:00", "14:00"),
            make_event(2, "2024-01-10", "15:10", "15:30"),
        ];
        let layout = layout_day(&events, day(), RowGeometry::default());

        let entries = &layout.slot(15).unwrap().entries;
        assert_eq!(entries[0].height_minutes, MIN_VISIBLE_MINUTES);
        assert!(entries[0].height_px > 0.0);
        // clamped extent [15:00, 15:15) overlaps the second event
        assert_eq!(entry_lanes(&layout, 15), vec![(1, 0, 2), (2, 1, 2)]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let events = vec![
            make_event(1, "2024-01-10", "10:00", "11:00"),
            make_event(2, "2024-01-10", "10:30", "11:30"),
            make_event(3, "2024-01-10", "10:45", "12:30"),
            make_event(4, "2024-01-10", "oops", "12:30"),
        ];
        let first = layout_day(&events, day(), RowGeometry::default());
        let second = layout_day(&events, day(), RowGeometry::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_week_layout() {
        let events = vec![
            make_event(1, "2024-01-07", "08:00", "09:00"),
            make_event(2, "2024-01-13", "22:00", "23:00"),
            make_event(3, "2024-01-14", "08:00", "09:00"),
            make_event(4, "", "08:00", "09:00"),
        ];
        let week = layout_week(&events, day(), RowGeometry::default());

        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].date, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(entry_lanes(&week.days[0], 8), vec![(1, 0, 1)]);
        assert_eq!(entry_lanes(&week.days[6], 22), vec![(2, 0, 1)]);
        assert_eq!(week.days.iter().map(|d| d.entries().count()).sum::<usize>(), 2);

        let rejected: Vec<_> = week.rejected.iter().map(|r| r.event.id).collect();
        assert_eq!(rejected, vec![4]);
        assert!(week.days.iter().all(|d| d.rejected.is_empty()));
    }
}
