use anyhow::{Context, Result};
use calgrid_core::time::{default_end_time, default_start_time};
use calgrid_core::{EventStatus, NewEvent, format_date, parse_clock, store};
use chrono::{NaiveDate, NaiveTime};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::client::Client;

pub const DEFAULT_CATEGORY: &str = "MEETING";
pub const DEFAULT_PRIORITY: u8 = 2;

/// Fields of a new event as given on the command line.
pub struct NewArgs {
    pub title: String,
    pub date: NaiveDate,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub guests: Vec<String>,
    pub status: EventStatus,
    pub category: Option<String>,
    pub priority: Option<u8>,
}

/// Build a draft, filling in the start (now, floored to the quarter hour),
/// the end (one hour after the start), the category and the priority when
/// they were not given.
pub fn build_draft(args: NewArgs, now: NaiveTime) -> Result<NewEvent> {
    let start = args.start.unwrap_or_else(|| default_start_time(now));
    let end = match args.end {
        Some(end) => end,
        None => default_end_time(&start)?,
    };

    let mut draft = NewEvent::new(args.title, format_date(args.date), start, end);
    draft.description = args.description.unwrap_or_default();
    draft.location = args.location;
    draft.attendees = args.guests;
    draft.status = args.status;
    draft.category = Some(args.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()));
    draft.priority = Some(args.priority.unwrap_or(DEFAULT_PRIORITY));

    validate_times(&draft)?;
    Ok(draft)
}

/// Reject drafts whose end is not after their start.
pub fn validate_times(draft: &NewEvent) -> Result<()> {
    let start = parse_clock(&draft.time)?;
    let end = parse_clock(&draft.end_time)?;
    if end <= start {
        anyhow::bail!(
            "End time {} must be after start time {}. Events cannot cross midnight",
            draft.end_time,
            draft.time
        );
    }
    Ok(())
}

pub async fn run(store_path: &Path, draft: NewEvent, uid_domain: &str, client: Option<&Client>) -> Result<()> {
    let event = match client {
        Some(client) => {
            let event = client.create_event(&draft).await?;
            store::upsert(store_path, event.clone()).context("Failed to update local store")?;
            event
        }
        None => store::create(store_path, draft, uid_domain)?,
    };

    println!(
        "{} Created {} {} {}",
        "+".green(),
        event.title.green(),
        format!("{} {}", event.date, event.render_time_range()).dimmed(),
        format!("#{}", event.id).dimmed()
    );

    Ok(())
}
