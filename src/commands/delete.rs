use anyhow::{Context, Result};
use calgrid_core::{CalGridError, store};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::client::Client;

pub async fn run(store_path: &Path, id: u64, client: Option<&Client>) -> Result<()> {
    if let Some(client) = client {
        client.delete_event(id).await?;
        println!("{} Deleted event #{} from the meeting API", "-".red(), id);

        // The local copy may never have been pulled
        match store::delete(store_path, id) {
            Ok(_) | Err(CalGridError::EventNotFound(_)) => {}
            Err(e) => return Err(e).context("Failed to update local store"),
        }
        return Ok(());
    }

    let removed = store::delete(store_path, id)?;
    println!("{} Deleted {} {}", "-".red(), removed.title, removed.render_time_range().dimmed());

    Ok(())
}
