//! Keyboard input and tick events.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::Mode;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic updates (message expiry, pending-count refresh)
    Tick,
}

/// How long the input thread blocks before checking whether the handler
/// is still alive.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Event handler that combines keyboard and tick events.
///
/// Ticks come from a timer, not from input-poll timeouts, so transient
/// messages keep expiring even while the user is typing.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tick: tokio::time::Interval,
}

impl EventHandler {
    /// Spawn the input thread and return the handler.
    pub fn new(tick_rate: Duration) -> EventHandler {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            loop {
                if event::poll(INPUT_POLL_TIMEOUT).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else if tx.is_closed() {
                    break;
                }
            }
        });

        Self::from_receiver(rx, tick_rate)
    }

    fn from_receiver(rx: mpsc::UnboundedReceiver<Event>, tick_rate: Duration) -> EventHandler {
        let mut tick =
            tokio::time::interval_at(tokio::time::Instant::now() + tick_rate, tick_rate);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        EventHandler { rx, tick }
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        tokio::select! {
            event = self.rx.recv() => event,
            _ = self.tick.tick() => Some(Event::Tick),
        }
    }
}

/// What a key press means in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Move selection up
    Up,
    /// Move selection down
    Down,
    /// Open the form to add a new event
    StartAdd,
    /// Open the form prefilled with the selected event
    StartEdit,
    /// Ask for confirmation to delete the selected event
    RequestDelete,
    /// Commit the pending delete
    ConfirmDelete,
    /// Abort the pending delete
    CancelDelete,
    /// Submit the form (add or update)
    SubmitForm,
    /// Close the form without saving
    CancelForm,
    /// Focus the next form field
    NextField,
    /// Focus the previous form field
    PrevField,
    /// Character input into the focused field
    Char(char),
    /// Backspace in the focused field
    Backspace,
}

/// Map a key event to an action for the given mode.
pub fn map_key_event(key: KeyEvent, mode: &Mode) -> KeyAction {
    // Ctrl-C quits from anywhere.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match mode {
        Mode::List => match key.code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => KeyAction::Up,
            KeyCode::Down | KeyCode::Char('j') => KeyAction::Down,
            KeyCode::Char('a') => KeyAction::StartAdd,
            KeyCode::Enter | KeyCode::Char('e') => KeyAction::StartEdit,
            KeyCode::Char('d') => KeyAction::RequestDelete,
            _ => KeyAction::None,
        },
        Mode::Form(_) => match key.code {
            KeyCode::Esc => KeyAction::CancelForm,
            KeyCode::Enter => KeyAction::SubmitForm,
            KeyCode::Tab | KeyCode::Down => KeyAction::NextField,
            KeyCode::BackTab | KeyCode::Up => KeyAction::PrevField,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char(c) => KeyAction::Char(c),
            _ => KeyAction::None,
        },
        Mode::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => KeyAction::ConfirmDelete,
            KeyCode::Char('n') | KeyCode::Esc => KeyAction::CancelDelete,
            _ => KeyAction::None,
        },
    }
}
