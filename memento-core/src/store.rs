//! The event store: an owned collection mirrored to a JSON file.
//!
//! Every mutation persists the whole collection and publishes a fresh
//! snapshot on a watch channel. Load and save failures are logged, never
//! propagated; validation failures are returned to the caller.

use std::path::{Path, PathBuf};

use tokio::sync::watch;

use crate::error::{MementoError, MementoResult};
use crate::event::{Event, EventDraft};

/// The in-memory event collection, bound to its JSON file on disk.
///
/// There is exactly one store per events file; the UI owns it and calls the
/// mutation methods directly. Background consumers (the reminder engine)
/// subscribe with [`watch`](EventStore::watch) and only ever see snapshots.
pub struct EventStore {
    path: PathBuf,
    events: Vec<Event>,
    tx: watch::Sender<Vec<Event>>,
}

impl EventStore {
    /// Load the store from `path`.
    ///
    /// A missing file, unreadable file, or unparseable file all yield an
    /// empty collection; the failure is logged and the next successful save
    /// overwrites whatever is on disk.
    pub fn load(path: impl Into<PathBuf>) -> EventStore {
        let path = path.into();
        let events = read_events(&path);
        let (tx, _) = watch::channel(events.clone());

        EventStore { path, events, tx }
    }

    /// The live collection, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Subscribe to collection snapshots.
    ///
    /// Receivers see the collection as of the latest mutation; intermediate
    /// states may be skipped (watch semantics), which is fine for consumers
    /// that rebuild from the newest snapshot anyway.
    pub fn watch(&self) -> watch::Receiver<Vec<Event>> {
        self.tx.subscribe()
    }

    /// Validate the draft, assign a fresh id, append, persist.
    pub fn add(&mut self, draft: EventDraft) -> MementoResult<&Event> {
        draft.validate()?;

        let index = self.events.len();
        self.events.push(draft.into_event());
        self.persist_and_publish();

        Ok(&self.events[index])
    }

    /// Replace the fields of the event with `id`, keeping id and position.
    pub fn update(&mut self, id: &str, draft: EventDraft) -> MementoResult<&Event> {
        draft.validate()?;

        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| MementoError::EventNotFound(id.to_string()))?;

        let event = &mut self.events[index];
        event.title = draft.title;
        event.description = draft.description;
        event.date = draft.date;
        event.time = draft.time;

        self.persist_and_publish();

        Ok(&self.events[index])
    }

    /// Remove the event with `id`.
    ///
    /// Returns whether an event was removed. Deleting an unknown id is a
    /// no-op and does not rewrite the file. Asking the user for confirmation
    /// is the caller's job; this is the commit step.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            return false;
        };

        self.events.remove(index);
        self.persist_and_publish();

        true
    }

    /// Replace the in-memory collection with whatever is on disk now.
    ///
    /// Used by the headless notifier when the file changes under it. Does
    /// not write; publishes the re-read snapshot.
    pub fn reload(&mut self) {
        self.events = read_events(&self.path);
        self.tx.send_replace(self.events.clone());
    }

    /// Write the full collection to disk and publish a snapshot.
    ///
    /// A write failure is logged and swallowed: the in-memory state stays
    /// authoritative and may diverge from disk until the next save succeeds.
    fn persist_and_publish(&mut self) {
        if let Err(e) = self.save() {
            log::error!("Could not save {}: {e}", self.path.display());
        }
        self.tx.send_replace(self.events.clone());
    }

    fn save(&self) -> MementoResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.events)
            .map_err(|e| MementoError::Serialization(e.to_string()))?;

        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Read and parse the events file, falling back to an empty collection.
fn read_events(path: &Path) -> Vec<Event> {
    if !path.exists() {
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::error!("Could not read {}: {e}", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(events) => events,
        Err(e) => {
            log::error!("Invalid events file {}: {e}", path.display());
            Vec::new()
        }
    }
}
