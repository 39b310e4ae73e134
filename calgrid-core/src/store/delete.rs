//! Remove events from the store.

use std::path::Path;

use super::{list, write_snapshot};
use crate::error::{CalGridError, CalGridResult};
use crate::event::Event;

/// Delete an event by id and return it.
pub fn delete(path: &Path, id: u64) -> CalGridResult<Event> {
    let mut events = list(path)?;

    let index = events
        .iter()
        .position(|e| e.id == id)
        .ok_or(CalGridError::EventNotFound(id))?;
    let removed = events.remove(index);

    write_snapshot(path, &events)?;

    tracing::debug!(id, "Deleted event");
    Ok(removed)
}
