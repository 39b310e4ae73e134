//! Calendar event types.
//!
//! Events are stored and exchanged exactly as the meeting API sends them:
//! the date and the start/end times stay raw strings, so a malformed record
//! still deserializes and is only rejected when something needs its span.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// A single calendar entry with a start and end time on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    #[serde(default)]
    pub uid: String,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// Start time, `HH:MM`
    #[serde(default)]
    pub time: String,
    /// End time, `HH:MM`
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Organizer display name
    #[serde(default)]
    pub user: String,
    /// Attendee email addresses
    #[serde(default, rename = "guests", alias = "attendees")]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// 0 (undefined) to 9 (lowest)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
}

/// The editable part of an event: everything except the identifiers and
/// timestamps the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub user: String,
    #[serde(default, rename = "guests", alias = "attendees")]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: impl Into<String>, time: impl Into<String>, end_time: impl Into<String>) -> Self {
        NewEvent {
            title: title.into(),
            date: date.into(),
            time: time.into(),
            end_time: end_time.into(),
            description: String::new(),
            location: None,
            user: String::new(),
            attendees: Vec::new(),
            status: EventStatus::Confirmed,
            category: None,
            priority: None,
            timezone: None,
        }
    }

    /// Turn the draft into a stored event with the given identity.
    pub fn into_event(self, id: u64, uid: String, created: String, last_modified: String) -> Event {
        Event {
            id,
            uid,
            title: self.title,
            date: self.date,
            time: self.time,
            end_time: self.end_time,
            description: self.description,
            location: self.location,
            user: self.user,
            attendees: self.attendees,
            status: self.status,
            category: self.category,
            priority: self.priority,
            created,
            last_modified,
            timezone: self.timezone,
        }
    }
}

impl From<&Event> for NewEvent {
    fn from(event: &Event) -> Self {
        NewEvent {
            title: event.title.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            end_time: event.end_time.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            user: event.user.clone(),
            attendees: event.attendees.clone(),
            status: event.status,
            category: event.category.clone(),
            priority: event.priority,
            timezone: event.timezone.clone(),
        }
    }
}

/// Parsed date and start/end of an event, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpan {
    pub date: NaiveDate,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl EventSpan {
    /// Hour slot the event is anchored to.
    pub fn start_hour(&self) -> u32 {
        self.start_minutes / MINUTES_PER_HOUR
    }

    /// True when `endTime <= time`.
    pub fn is_malformed(&self) -> bool {
        self.end_minutes <= self.start_minutes
    }
}

impl Event {
    /// Parse the raw date and times.
    pub fn span(&self) -> CalGridResult<EventSpan> {
        let date = parse_date(&self.date)?;
        let start_minutes = parse_clock(&self.time)?;
        if start_minutes >= MINUTES_PER_DAY {
            return Err(CalGridError::InvalidTime(self.time.clone()));
        }
        let end_minutes = parse_clock(&self.end_time)?;

        Ok(EventSpan {
            date,
            start_minutes,
            end_minutes,
        })
    }

    /// "high", "medium" or "low" for priorities 1 to 3; other values have no label.
    pub fn priority_label(&self) -> Option<&'static str> {
        match self.priority? {
            1 => Some("high"),
            2 => Some("medium"),
            3 => Some("low"),
            _ => None,
        }
    }

    /// Render the time range the way the grid labels events, e.g. "10:00～11:00"
    pub fn render_time_range(&self) -> String {
        format!("{}～{}", self.time, self.end_time)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Parse `YYYY-MM-DD`. A trailing `T...` time part is ignored.
pub fn parse_date(s: &str) -> CalGridResult<NaiveDate> {
    let date_part = s.split('T').next().unwrap_or_default().trim();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| CalGridError::InvalidDate(s.to_string()))
}

/// Parse `HH:MM` into minutes since midnight. `24:00` is accepted as end of day.
pub fn parse_clock(s: &str) -> CalGridResult<u32> {
    let invalid = || CalGridError::InvalidTime(s.to_string());

    let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    match (hours, minutes) {
        (24, 0) => Ok(MINUTES_PER_DAY),
        (h, m) if h < 24 && m < 60 => Ok(h * MINUTES_PER_HOUR + m),
        _ => Err(invalid()),
    }
}

/// Format minutes since midnight as `HH:MM`.
pub fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
}

/// Format a date the way events store it.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_event(id: u64, date: &str, time: &str, end_time: &str) -> Event {
        NewEvent::new(format!("Event {}", id), date, time, end_time).into_event(
            id,
            format!("evt-{:03}@example.com", id),
            "2024-01-01T09:00:00Z".to_string(),
            "2024-01-01T09:00:00Z".to_string(),
        )
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("09:45").unwrap(), 585);
        assert_eq!(parse_clock("9:05").unwrap(), 545);
        assert_eq!(parse_clock("23:59").unwrap(), 1439);
        assert_eq!(parse_clock("24:00").unwrap(), MINUTES_PER_DAY);
    }

    #[test]
    fn test_parse_clock_rejects_garbage() {
        for bad in ["", "10", "10:5", "25:00", "10:60", "24:30", "ab:cd", "-1:00", "+9:00", "10:+5", "٩:00"] {
            assert!(parse_clock(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_priority_label() {
        let mut event = make_event(1, "2024-01-10", "09:00", "10:00");
        assert_eq!(event.priority_label(), None);
        event.priority = Some(2);
        assert_eq!(event.priority_label(), Some("medium"));
        event.priority = Some(7);
        assert_eq!(event.priority_label(), None);
    }

    #[test]
    fn test_parse_date_ignores_time_part() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(parse_date("2024-01-10").unwrap(), expected);
        assert_eq!(parse_date("2024-01-10T00:00:00.000Z").unwrap(), expected);
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_span_rejects_end_of_day_start() {
        let event = make_event(1, "2024-01-10", "24:00", "24:00");
        assert!(matches!(event.span(), Err(CalGridError::InvalidTime(_))));
    }

    #[test]
    fn test_span_flags_malformed() {
        let span = make_event(1, "2024-01-10", "11:00", "10:00").span().unwrap();
        assert!(span.is_malformed());
        assert_eq!(span.start_hour(), 11);
    }

    #[test]
    fn test_deserialize_api_event() {
        let json = r#"{
            "id": 1,
            "uid": "evt-001@example.com",
            "title": "週次ミーティング",
            "date": "2025-01-15",
            "time": "09:00",
            "endTime": "10:00",
            "description": "週次の進捗報告会議",
            "location": "会議室A",
            "user": "山田太郎",
            "guests": ["tanaka@example.com", "suzuki@example.com"],
            "status": "CONFIRMED",
            "category": "MEETING",
            "priority": 2,
            "created": "2024-03-01T10:00:00Z",
            "lastModified": "2024-03-01T10:00:00Z",
            "timezone": "Asia/Tokyo"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.end_time, "10:00");
        assert_eq!(event.attendees.len(), 2);
        assert_eq!(event.status, EventStatus::Confirmed);
        assert_eq!(event.priority, Some(2));

        let out = serde_json::to_value(&event).unwrap();
        assert_eq!(out["endTime"], "10:00");
        assert_eq!(out["guests"][0], "tanaka@example.com");
        assert_eq!(out["lastModified"], "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_deserialize_tolerates_missing_times() {
        let event: Event = serde_json::from_str(r#"{"id": 7, "title": "No time"}"#).unwrap();
        assert!(event.time.is_empty());
        assert!(event.span().is_err());
    }

    #[test]
    fn test_attendees_alias() {
        let event: Event =
            serde_json::from_str(r#"{"id": 1, "title": "t", "attendees": ["a@example.com"]}"#).unwrap();
        assert_eq!(event.attendees, vec!["a@example.com".to_string()]);
    }
}
