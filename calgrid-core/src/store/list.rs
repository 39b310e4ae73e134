//! Read the event snapshot.

use std::path::Path;

use crate::error::{CalGridError, CalGridResult};
use crate::event::Event;

/// Read all stored events in stored order. A missing file is an empty calendar.
///
/// A file that exists but cannot be read or parsed is an error, so that the
/// next write does not silently replace it.
pub fn list(path: &Path) -> CalGridResult<Vec<Event>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| CalGridError::Store(format!("Failed to read {}: {}", path.display(), e)))?;

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    let events: Vec<Event> = serde_json::from_str(&contents)
        .map_err(|e| CalGridError::Store(format!("Failed to parse {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), count = events.len(), "Loaded event store");
    Ok(events)
}
