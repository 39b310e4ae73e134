use anyhow::{Context, Result};
use calgrid_core::{EventStatus, NewEvent, format_date, store};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use std::path::Path;

use super::new::validate_times;
use crate::client::Client;

/// Fields to change; None leaves the stored value alone.
#[derive(Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    /// Replaces the whole guest list
    pub guests: Option<Vec<String>>,
    pub category: Option<String>,
    pub priority: Option<u8>,
}

impl EventChanges {
    pub fn apply(self, draft: &mut NewEvent) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(date) = self.date {
            draft.date = format_date(date);
        }
        if let Some(start) = self.start {
            draft.time = start;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(location) = self.location {
            draft.location = Some(location).filter(|l| !l.is_empty());
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(guests) = self.guests {
            draft.attendees = guests;
        }
        if let Some(category) = self.category {
            draft.category = Some(category).filter(|c| !c.is_empty());
        }
        if let Some(priority) = self.priority {
            draft.priority = Some(priority);
        }
    }
}

pub async fn run(store_path: &Path, id: u64, changes: EventChanges, client: Option<&Client>) -> Result<()> {
    let events = super::load_snapshot(store_path)?;
    let existing = events
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| anyhow::anyhow!("Event #{} not found. Run `calgrid list` to see event ids", id))?;

    let mut draft = NewEvent::from(existing);
    changes.apply(&mut draft);
    validate_times(&draft)?;

    let event = match client {
        Some(client) => {
            let event = client.update_event(id, &draft).await?;
            store::upsert(store_path, event.clone()).context("Failed to update local store")?;
            event
        }
        None => store::update(store_path, id, draft)?,
    };

    println!(
        "{} Updated {} {}",
        "~".yellow(),
        event.title.yellow(),
        format!("{} {}", event.date, event.render_time_range()).dimmed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_given_fields() {
        let mut draft = NewEvent::new("Standup", "2024-01-10", "09:00", "09:15");
        draft.location = Some("Room A".to_string());
        draft.attendees = vec!["tanaka@example.com".to_string()];
        draft.category = Some("MEETING".to_string());
        draft.priority = Some(2);

        EventChanges {
            end: Some("09:30".to_string()),
            location: Some(String::new()),
            ..Default::default()
        }
        .apply(&mut draft);

        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.time, "09:00");
        assert_eq!(draft.end_time, "09:30");
        assert_eq!(draft.location, None);
        assert_eq!(draft.attendees, vec!["tanaka@example.com"]);
        assert_eq!(draft.category.as_deref(), Some("MEETING"));
        assert_eq!(draft.priority, Some(2));

        EventChanges {
            guests: Some(vec!["suzuki@example.com".to_string(), "sato@example.com".to_string()]),
            category: Some("REVIEW".to_string()),
            priority: Some(1),
            ..Default::default()
        }
        .apply(&mut draft);

        assert_eq!(draft.attendees, vec!["suzuki@example.com", "sato@example.com"]);
        assert_eq!(draft.category.as_deref(), Some("REVIEW"));
        assert_eq!(draft.priority, Some(1));
        assert_eq!(draft.end_time, "09:30");
    }
}
