//! Core library for the memento ecosystem.
//!
//! Shared between the `memento` TUI and the `memento-notify` daemon:
//! - `event`: the `Event` model and validated drafts
//! - `store`: the JSON-backed event store with a snapshot channel
//! - `schedule`: the reschedule pass and the reminder engine
//! - `notify`: the desktop notification backend
//! - `config`: the global config file

pub mod config;
pub mod error;
pub mod event;
pub mod notify;
pub mod schedule;
pub mod store;

pub use config::MementoConfig;
pub use error::{MementoError, MementoResult};
pub use event::{Event, EventDraft};
pub use notify::{DesktopNotifier, Notifier};
pub use schedule::{build_schedule, Reminder, ReminderEngine};
pub use store::EventStore;
