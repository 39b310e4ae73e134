pub mod day;
pub mod delete;
pub mod list;
pub mod month;
pub mod new;
pub mod pull;
pub mod show;
pub mod update;
pub mod week;

use anyhow::{Context, Result};
use calgrid_core::{Event, store};
use std::path::Path;

/// Load the local snapshot every view is computed from.
fn load_snapshot(store_path: &Path) -> Result<Vec<Event>> {
    store::list(store_path)
        .with_context(|| format!("Failed to load events from {}", store_path.display()))
}
