use anyhow::{Context, Result};
use calgrid_core::protocol::EventsQueryParams;
use calgrid_core::{Event, store};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::client::Client;

/// Fetch events from the meeting API into the local store.
///
/// An unfiltered pull replaces the local snapshot. A filtered pull only sees
/// part of the calendar, so the returned events are merged by id instead.
pub async fn run(client: &Client, store_path: &Path, params: EventsQueryParams) -> Result<()> {
    let response = client.list_events(&params).await?;
    let filtered = params.is_filtered();
    let count = response.events.len();

    save_pulled(store_path, response.events, filtered)
        .with_context(|| format!("Failed to write events to {}", store_path.display()))?;

    println!(
        "{} {} {} of {} events into {}",
        "✓".green(),
        if filtered { "Merged" } else { "Pulled" },
        count,
        response.total,
        store_path.display().dimmed()
    );

    Ok(())
}

fn save_pulled(store_path: &Path, events: Vec<Event>, filtered: bool) -> calgrid_core::CalGridResult<()> {
    if filtered {
        store::merge(store_path, events)
    } else {
        store::replace_all(store_path, &events)
    }
}
