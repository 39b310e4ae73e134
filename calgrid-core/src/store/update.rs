//! Edit stored events.

use std::path::Path;

use super::{list, now_timestamp, write_snapshot};
use crate::error::{CalGridError, CalGridResult};
use crate::event::{Event, NewEvent};

/// Replace the editable fields of an event. The id, uid and creation time
/// are kept; `lastModified` is refreshed.
pub fn update(path: &Path, id: u64, draft: NewEvent) -> CalGridResult<Event> {
    let mut events = list(path)?;

    let existing = events
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(CalGridError::EventNotFound(id))?;

    let updated = draft.into_event(id, existing.uid.clone(), existing.created.clone(), now_timestamp());
    *existing = updated.clone();

    write_snapshot(path, &events)?;

    tracing::debug!(id, "Updated event");
    Ok(updated)
}
