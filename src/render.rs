//! Terminal rendering for calgrid views.
//!
//! The week and day views print one line per laid-out event, grouped by hour
//! row, with the lane and pixel geometry the grid would use. The month view
//! prints the 6×7 grid with per-day event counts.

use calgrid_core::grid::{CellPosition, MonthGrid, TimeMarker, events_on, is_past, is_weekend};
use calgrid_core::layout::{DayLayout, LayoutEntry, RejectedEvent, WeekLayout};
use calgrid_core::{Event, EventStatus};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let line = format!("{} {}", self.render_time_range(), self.title);
        let line = match self.status {
            EventStatus::Confirmed => line,
            EventStatus::Tentative => format!("{} {}", line, "(tentative)".dimmed()),
            EventStatus::Cancelled => line.strikethrough().to_string(),
        };
        match &self.location {
            Some(location) if !location.is_empty() => format!("{} {}", line, format!("@ {}", location).dimmed()),
            _ => line,
        }
    }
}

/// Every field of one event, one per line.
pub struct EventDetail<'a>(pub &'a Event);

impl Render for EventDetail<'_> {
    fn render(&self) -> String {
        let event = self.0;
        let mut lines = vec![format!("{} {}", event.title.bold(), format!("#{}", event.id).dimmed())];

        let when = format!("{} {}", event.date, event.render_time_range());
        lines.push(match &event.timezone {
            Some(tz) => format!("  {} {}", when, format!("({})", tz).dimmed()),
            None => format!("  {}", when),
        });

        let status = match event.status {
            EventStatus::Confirmed => "confirmed".green().to_string(),
            EventStatus::Tentative => "tentative".yellow().to_string(),
            EventStatus::Cancelled => "cancelled".red().to_string(),
        };
        lines.push(format!("  {} {}", "Status:".dimmed(), status));

        if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
            lines.push(format!("  {} {}", "Location:".dimmed(), location));
        }
        if let Some(category) = &event.category {
            lines.push(format!("  {} {}", "Category:".dimmed(), category));
        }
        if let Some(priority) = event.priority {
            let label = match event.priority_label() {
                Some(label) => format!("{} ({})", priority, label),
                None => priority.to_string(),
            };
            lines.push(format!("  {} {}", "Priority:".dimmed(), label));
        }
        if !event.user.is_empty() {
            lines.push(format!("  {} {}", "Organizer:".dimmed(), event.user));
        }
        if !event.attendees.is_empty() {
            lines.push(format!("  {} ({})", "Guests:".dimmed(), event.attendees.len()));
            lines.extend(event.attendees.iter().map(|guest| format!("    {}", guest)));
        }
        if !event.description.is_empty() {
            lines.push(String::new());
            lines.extend(event.description.lines().map(|line| format!("  {}", line)));
        }
        if !event.uid.is_empty() {
            lines.push(format!("  {}", event.uid.dimmed()));
        }

        lines.join("\n")
    }
}

impl Render for LayoutEntry<'_> {
    fn render(&self) -> String {
        let lane = format!("lane {}/{}", self.lane_index + 1, self.lane_count);
        let lane = if self.lane_count > 1 {
            lane.yellow().to_string()
        } else {
            lane.dimmed().to_string()
        };
        let geometry = format!("top {}px  h {}px", fmt_px(self.top_px), fmt_px(self.height_px));
        let more = if self.truncated { " ↓".to_string() } else { String::new() };

        format!("{}  {}  {}{}", self.event.render(), lane, geometry.dimmed(), more.cyan())
    }
}

impl Render for RejectedEvent<'_> {
    fn render(&self) -> String {
        format!("{} #{} {}: {}", "!".red(), self.event.id, self.event.title, self.reason.dimmed())
    }
}

/// Print a pixel value without a trailing `.0`.
fn fmt_px(px: f64) -> String {
    if px.fract() == 0.0 {
        format!("{}", px as i64)
    } else {
        format!("{:.1}", px)
    }
}

/// Render one day's rows. Only hours with events (or the "now" line) are
/// shown; hours that have already started are dimmed.
pub fn render_day(day: &DayLayout, marker: Option<&TimeMarker>, now: NaiveDateTime) -> String {
    let mut lines = Vec::new();

    for slot in &day.slots {
        let label = format!("  {:02}:00", slot.hour);
        let past = is_past(day.date, slot.hour, 0, now);
        for (i, entry) in slot.entries.iter().enumerate() {
            let label = if i == 0 { label.clone() } else { " ".repeat(label.len()) };
            let label = if past { label.dimmed().to_string() } else { label };
            lines.push(format!("{} │ {}", label, entry.render()));
        }

        if let Some(marker) = marker {
            if now.hour() == slot.hour {
                let line = format!("  ──── now {} ({}px)", now.format("%H:%M"), fmt_px(marker.offset_px));
                lines.push(line.red().to_string());
            }
        }
    }

    if day.is_empty() && marker.is_none() {
        lines.push("  No events".dimmed().to_string());
    }

    lines.extend(render_rejected(&day.rejected));
    lines.join("\n")
}

/// Render a whole week, one block per day.
pub fn render_week(week: &WeekLayout, marker: Option<&TimeMarker>, now: NaiveDateTime) -> String {
    let today = now.date();
    let mut blocks = Vec::new();

    for (index, day) in week.days.iter().enumerate() {
        let day_marker = marker.filter(|m| m.day_index == index);
        let header = render_day_header(day.date, today);
        let body = if day.is_empty() && day_marker.is_none() {
            "  No events".dimmed().to_string()
        } else {
            render_day(day, day_marker, now)
        };
        blocks.push(format!("{}\n{}", header, body));
    }

    let rejected = render_rejected(&week.rejected);
    if !rejected.is_empty() {
        blocks.push(rejected.join("\n"));
    }

    blocks.join("\n\n")
}

/// Day heading like "Wed Jan 10", highlighted for today and dimmed on weekends.
pub fn render_day_header(date: NaiveDate, today: NaiveDate) -> String {
    let label = date.format("%a %b %-d").to_string();
    if date == today {
        format!("{} {}", label.bold().blue(), "(today)".blue())
    } else if is_weekend(date) {
        label.bold().dimmed().to_string()
    } else {
        label.bold().to_string()
    }
}

fn render_rejected(rejected: &[RejectedEvent]) -> Vec<String> {
    if rejected.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("  Skipped {} event(s) with an unreadable date or time:", rejected.len())
        .red()
        .to_string()];
    lines.extend(rejected.iter().map(|r| format!("    {}", r.render())));
    lines
}

/// Render the month grid followed by the month's events.
pub fn render_month(grid: &MonthGrid, events: &[Event], today: NaiveDate) -> String {
    let mut lines = Vec::new();

    let first = grid.current()[0].date;
    lines.push(first.format("%B %Y").to_string().bold().to_string());
    lines.push(
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
            .iter()
            .map(|d| format!("{:<7}", d))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| {
                let count = events_on(events, cell.date).len();
                let text = if count > 0 && cell.position == CellPosition::Current {
                    format!("{:>2} ({})", cell.date.format("%-d"), count)
                } else {
                    format!("{:>2}", cell.date.format("%-d"))
                };
                let text = format!("{:<7}", text);
                match cell.position {
                    CellPosition::Previous | CellPosition::Next => text.dimmed().to_string(),
                    CellPosition::Current if cell.date == today => text.reversed().to_string(),
                    CellPosition::Current if count > 0 => text.green().to_string(),
                    CellPosition::Current => text,
                }
            })
            .collect();
        lines.push(row);
    }

    let with_events: Vec<_> = grid
        .current()
        .iter()
        .map(|cell| (cell.date, events_on(events, cell.date)))
        .filter(|(_, day_events)| !day_events.is_empty())
        .collect();

    if !with_events.is_empty() {
        lines.push(String::new());
    }
    for (date, day_events) in with_events {
        lines.push(render_day_header(date, today));
        for event in day_events {
            lines.push(format!("  {}", event.render()));
        }
    }

    lines.join("\n")
}
