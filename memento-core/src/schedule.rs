//! Reminder scheduling: the reschedule pass and the engine that fires them.
//!
//! Scheduling is cancel-all-and-rebuild: every collection change throws the
//! pending set away and recomputes it from scratch. The set is never diffed
//! against the previous one, so there is nothing to get out of sync.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::event::Event;
use crate::notify::Notifier;

/// Notification title used for every reminder.
///
/// Fixed rather than derived from the event's own title. Matches the
/// behavior users already have; changing it is an open product decision.
pub const REMINDER_TITLE: &str = "Event Notification";

/// Notification body used for every reminder.
pub const REMINDER_BODY: &str = "Check out this event!";

/// A pending reminder: one per future-dated event.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    /// Id of the event this reminder belongs to.
    pub event_id: String,
    /// The instant the notification should fire.
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
}

/// The reschedule pass.
///
/// Builds the full pending set from scratch: one reminder per event whose
/// trigger instant is strictly after `now`. Events with unparseable date or
/// time fields are skipped. Output is sorted by fire time, ties broken by
/// event id, so the pass is deterministic.
pub fn build_schedule(events: &[Event], now: DateTime<Utc>) -> Vec<Reminder> {
    let mut reminders: Vec<Reminder> = events
        .iter()
        .filter_map(|event| {
            let Some(fire_at) = event.trigger_instant() else {
                log::debug!(
                    "Skipping event {} ({:?} {:?}): unparseable date/time",
                    event.id,
                    event.date,
                    event.time
                );
                return None;
            };

            if fire_at <= now {
                return None;
            }

            Some(Reminder {
                event_id: event.id.clone(),
                fire_at,
                title: REMINDER_TITLE.to_string(),
                body: REMINDER_BODY.to_string(),
            })
        })
        .collect();

    reminders.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then(a.event_id.cmp(&b.event_id)));
    reminders
}

/// Background task that fires reminders as they come due.
///
/// Consumes collection snapshots from the store's watch channel. On every
/// snapshot it discards its pending set and rebuilds; between snapshots it
/// sleeps until the head reminder is due and fires it through the notifier.
/// The task ends when the store (the channel sender) is dropped.
pub struct ReminderEngine<N> {
    rx: watch::Receiver<Vec<Event>>,
    notifier: N,
}

impl<N: Notifier> ReminderEngine<N> {
    pub fn new(rx: watch::Receiver<Vec<Event>>, notifier: N) -> Self {
        ReminderEngine { rx, notifier }
    }

    pub async fn run(mut self) {
        let mut pending = build_schedule(&self.rx.borrow_and_update(), Utc::now());

        loop {
            let Some(next) = pending.first() else {
                // Nothing pending: wait for the collection to change.
                if self.rx.changed().await.is_err() {
                    return;
                }
                pending = build_schedule(&self.rx.borrow_and_update(), Utc::now());
                continue;
            };

            let wait = (next.fire_at - Utc::now())
                .to_std()
                .unwrap_or(std::time::Duration::ZERO);

            tokio::select! {
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    pending = build_schedule(&self.rx.borrow_and_update(), Utc::now());
                }
                _ = tokio::time::sleep(wait) => {
                    let reminder = pending.remove(0);
                    self.fire(&reminder);
                }
            }
        }
    }

    /// Fire one reminder. Failures are logged and the reminder is dropped;
    /// there are no retries.
    fn fire(&self, reminder: &Reminder) {
        match self.notifier.notify(reminder) {
            Ok(()) => log::info!("Fired reminder for event {}", reminder.event_id),
            Err(e) => log::warn!(
                "Could not fire reminder for event {}: {e}",
                reminder.event_id
            ),
        }
    }
}
