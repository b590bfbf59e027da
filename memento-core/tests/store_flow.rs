//! End-to-end flow over a real events file: add, edit, delete, and check
//! what lands on disk at each step.

use memento_core::{EventDraft, EventStore};
use tempfile::TempDir;

fn draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: "Bring the slides".to_string(),
        date: "2030-06-01".to_string(),
        time: "09:30".to_string(),
    }
}

#[test]
fn add_edit_delete_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.json");

    // Add.
    let mut store = EventStore::load(&path);
    let id = store.add(draft("Quarterly review")).unwrap().id.clone();
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.events()[0].title, "Quarterly review");

    // A fresh load sees the same event.
    let mut store = EventStore::load(&path);
    assert_eq!(store.events().len(), 1);
    assert_eq!(store.events()[0].id, id);

    // Edit the title: same id, new title.
    let mut edited = store.events()[0].to_draft();
    edited.title = "Quarterly review (moved)".to_string();
    let updated = store.update(&id, edited).unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Quarterly review (moved)");

    let store2 = EventStore::load(&path);
    assert_eq!(store2.events()[0].title, "Quarterly review (moved)");

    // Delete: list empties and the file holds an empty array.
    assert!(store.delete(&id));
    assert!(store.events().is_empty());

    let on_disk = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn persisted_format_is_a_flat_array_of_events() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.json");

    let mut store = EventStore::load(&path);
    store.add(draft("Dentist")).unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let entry = &on_disk.as_array().unwrap()[0];

    for key in ["id", "title", "description", "date", "time"] {
        assert!(entry.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(entry["title"], "Dentist");
}
