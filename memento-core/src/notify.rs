//! Desktop notification backend.

use notify_rust::Notification;

use crate::error::{MementoError, MementoResult};
use crate::schedule::Reminder;

/// Something that can show a reminder to the user right now.
///
/// The engine calls [`notify`](Notifier::notify) at the reminder's computed
/// instant; there is no deferred registration at this seam. Tests substitute
/// a recording implementation.
pub trait Notifier: Send + Sync {
    fn notify(&self, reminder: &Reminder) -> MementoResult<()>;
}

/// Notifier backed by the desktop notification service.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        DesktopNotifier
    }

    /// Check once at startup that notifications can be delivered.
    ///
    /// On XDG platforms this asks the notification daemon for its
    /// capabilities over D-Bus; elsewhere there is nothing to probe.
    /// Callers surface a failure once and keep scheduling; later sends
    /// then fail silently (logged by the engine).
    pub fn probe(&self) -> MementoResult<()> {
        #[cfg(all(unix, not(target_os = "macos")))]
        notify_rust::get_capabilities().map_err(|e| MementoError::Notify(e.to_string()))?;

        Ok(())
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, reminder: &Reminder) -> MementoResult<()> {
        Notification::new()
            .summary(&reminder.title)
            .body(&reminder.body)
            .appname("memento")
            .show()
            .map_err(|e| MementoError::Notify(e.to_string()))?;

        Ok(())
    }
}
