//! Local event storage.
//!
//! The whole snapshot lives in one JSON file holding an array of events.
//! Every operation reads the file, changes the snapshot and writes it back:
//! last write wins and there is no locking.

mod create;
mod delete;
mod list;
mod update;

pub use create::{create, merge, upsert};
pub use delete::delete;
pub use list::list;
pub use update::update;

use std::path::Path;

use chrono::{SecondsFormat, Utc};

use crate::error::{CalGridError, CalGridResult};
use crate::event::Event;

/// Overwrite the stored snapshot.
pub fn replace_all(path: &Path, events: &[Event]) -> CalGridResult<()> {
    write_snapshot(path, events)
}

fn write_snapshot(path: &Path, events: &[Event]) -> CalGridResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CalGridError::Store(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }

    let contents = serde_json::to_string_pretty(events)?;
    std::fs::write(path, contents)
        .map_err(|e| CalGridError::Store(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), count = events.len(), "Wrote event store");
    Ok(())
}

/// Timestamp format used for `created` / `lastModified`, e.g. `2024-01-01T09:00:00.000Z`
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
