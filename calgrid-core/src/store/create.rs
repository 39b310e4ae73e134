//! Add events to the store.

use std::path::Path;

use super::{list, now_timestamp, write_snapshot};
use crate::error::CalGridResult;
use crate::event::{Event, NewEvent};

/// Create a new event from a draft and append it to the store.
///
/// The id is one past the highest stored id, the uid is derived from it
/// (`evt-004@example.com`), and both timestamps are set to now.
pub fn create(path: &Path, mut draft: NewEvent, uid_domain: &str) -> CalGridResult<Event> {
    let mut events = list(path)?;

    // Drafts coming from a date picker may carry a time part
    if let Some((date, _)) = draft.date.split_once('T') {
        draft.date = date.to_string();
    }

    let id = next_id(&events);
    let now = now_timestamp();
    let event = draft.into_event(id, uid_for(id, uid_domain), now.clone(), now);

    events.push(event.clone());
    write_snapshot(path, &events)?;

    tracing::debug!(id = event.id, uid = %event.uid, "Created event");
    Ok(event)
}

/// Store an event that already has an identity (e.g. one returned by the API),
/// replacing any stored event with the same id.
pub fn upsert(path: &Path, event: Event) -> CalGridResult<()> {
    merge(path, vec![event])
}

/// Upsert several events with a single write. Stored events with other ids
/// are kept as they are.
pub fn merge(path: &Path, incoming: Vec<Event>) -> CalGridResult<()> {
    let mut events = list(path)?;

    for event in incoming {
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
    }

    write_snapshot(path, &events)
}

fn next_id(events: &[Event]) -> u64 {
    events.iter().map(|e| e.id).max().unwrap_or(0) + 1
}

fn uid_for(id: u64, domain: &str) -> String {
    format!("evt-{:03}@{}", id, domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::make_event;
    use crate::store::replace_all;

    #[test]
    fn test_create_assigns_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let first = create(&path, NewEvent::new("Standup", "2024-01-10", "09:00", "09:15"), "example.com").unwrap();
        let second = create(&path, NewEvent::new("Review", "2024-01-10T00:00:00.000Z", "14:00", "15:30"), "example.com").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(first.uid, "evt-001@example.com");
        assert_eq!(first.created, first.last_modified);
        assert_eq!(second.id, 2);
        assert_eq!(second.date, "2024-01-10");
        assert_eq!(list(&path).unwrap(), vec![first, second]);
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        replace_all(
            &path,
            &[make_event(1, "2024-01-10", "09:00", "10:00"), make_event(5, "2024-01-10", "11:00", "12:00")],
        )
        .unwrap();

        let created = create(&path, NewEvent::new("Lunch", "2024-01-10", "12:00", "13:00"), "example.com").unwrap();
        assert_eq!(created.id, 6);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.json");

        upsert(&path, make_event(3, "2024-01-10", "09:00", "10:00")).unwrap();
        let mut changed = make_event(3, "2024-01-10", "09:30", "10:00");
        changed.title = "Moved".to_string();
        upsert(&path, changed.clone()).unwrap();

        assert_eq!(list(&path).unwrap(), vec![changed]);
    }

    #[test]
    fn test_merge_keeps_unrelated_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let local = make_event(1, "2024-01-10", "09:00", "10:00");
        replace_all(&path, &[local.clone(), make_event(7, "2024-02-03", "09:00", "10:00")]).unwrap();

        let mut moved = make_event(7, "2024-02-03", "13:00", "14:00");
        moved.title = "Moved".to_string();
        let fresh = make_event(8, "2024-02-04", "09:00", "10:00");
        merge(&path, vec![moved.clone(), fresh.clone()]).unwrap();

        assert_eq!(list(&path).unwrap(), vec![local, moved, fresh]);
    }
}
