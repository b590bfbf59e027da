//! Application state and key-action handling.

use chrono::Utc;
use memento_core::{build_schedule, Event, EventDraft, EventStore};

use crate::event::KeyAction;

/// Labels for the four form fields, in focus order.
pub const FIELD_LABELS: [&str; 4] = ["Title", "Description", "Date (YYYY-MM-DD)", "Time (HH:MM)"];

/// Ticks a status/error message stays on screen (tick rate is 250ms).
const MESSAGE_TICKS: u8 = 20;

/// State of the add/edit form modal.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    /// Id of the event being edited; `None` when adding.
    pub target: Option<String>,
    /// Field values in [`FIELD_LABELS`] order.
    pub fields: [String; 4],
    /// Index of the focused field.
    pub focus: usize,
}

impl FormState {
    /// An empty form for a new event.
    pub fn add() -> FormState {
        FormState {
            target: None,
            fields: Default::default(),
            focus: 0,
        }
    }

    /// A form prefilled with an existing event's values.
    pub fn edit(event: &Event) -> FormState {
        FormState {
            target: Some(event.id.clone()),
            fields: [
                event.title.clone(),
                event.description.clone(),
                event.date.clone(),
                event.time.clone(),
            ],
            focus: 0,
        }
    }

    pub fn draft(&self) -> EventDraft {
        EventDraft {
            title: self.fields[0].clone(),
            description: self.fields[1].clone(),
            date: self.fields[2].clone(),
            time: self.fields[3].clone(),
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }
}

/// What the UI is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// The event list.
    List,
    /// The add/edit form modal.
    Form(FormState),
    /// The delete confirmation modal (phase one of the two-phase delete;
    /// confirming calls `store.delete`, which is the commit).
    ConfirmDelete { id: String, title: String },
}

/// Main application state. Owns the store; the reminder engine only gets
/// the store's watch channel.
pub struct App {
    pub store: EventStore,
    pub mode: Mode,
    /// Selected row in the list view.
    pub selected: usize,
    pub should_quit: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    /// Whether the startup notification probe succeeded.
    pub notifications_available: bool,
    message_age: u8,
}

impl App {
    pub fn new(store: EventStore) -> App {
        App {
            store,
            mode: Mode::List,
            selected: 0,
            should_quit: false,
            error_message: None,
            status_message: None,
            notifications_available: true,
            message_age: 0,
        }
    }

    /// The event under the cursor, if any.
    pub fn selected_event(&self) -> Option<&Event> {
        self.store.events().get(self.selected)
    }

    /// Number of reminders currently pending (shown in the list header).
    pub fn pending_count(&self) -> usize {
        build_schedule(self.store.events(), Utc::now()).len()
    }

    /// Apply one key action.
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => self.should_quit = true,

            KeyAction::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyAction::Down => {
                let max = self.store.events().len();
                if self.selected + 1 < max {
                    self.selected += 1;
                }
            }

            KeyAction::StartAdd => {
                self.mode = Mode::Form(FormState::add());
            }
            KeyAction::StartEdit => {
                if let Some(event) = self.selected_event() {
                    self.mode = Mode::Form(FormState::edit(event));
                }
            }
            KeyAction::RequestDelete => {
                if let Some(event) = self.selected_event() {
                    self.mode = Mode::ConfirmDelete {
                        id: event.id.clone(),
                        title: event.title.clone(),
                    };
                }
            }

            KeyAction::ConfirmDelete => {
                if let Mode::ConfirmDelete { id, title } = std::mem::replace(&mut self.mode, Mode::List)
                {
                    if self.store.delete(&id) {
                        self.set_status(format!("Deleted \"{title}\""));
                    }
                    self.clamp_selection();
                }
            }
            KeyAction::CancelDelete => {
                self.mode = Mode::List;
            }

            KeyAction::SubmitForm => self.submit_form(),
            KeyAction::CancelForm => {
                self.mode = Mode::List;
            }
            KeyAction::NextField => {
                if let Mode::Form(form) = &mut self.mode {
                    form.focus_next();
                }
            }
            KeyAction::PrevField => {
                if let Mode::Form(form) = &mut self.mode {
                    form.focus_prev();
                }
            }
            KeyAction::Char(c) => {
                if let Mode::Form(form) = &mut self.mode {
                    form.fields[form.focus].push(c);
                }
            }
            KeyAction::Backspace => {
                if let Mode::Form(form) = &mut self.mode {
                    form.fields[form.focus].pop();
                }
            }
        }
    }

    /// Expire transient messages.
    pub fn on_tick(&mut self) {
        if self.error_message.is_none() && self.status_message.is_none() {
            return;
        }
        self.message_age += 1;
        if self.message_age >= MESSAGE_TICKS {
            self.error_message = None;
            self.status_message = None;
            self.message_age = 0;
        }
    }

    /// Add or update from the open form. A validation failure keeps the
    /// form open with its state intact and shows the error in the status
    /// bar; nothing is persisted.
    fn submit_form(&mut self) {
        let Mode::Form(form) = &self.mode else {
            return;
        };
        let draft = form.draft();

        let result = match form.target.clone() {
            Some(id) => self.store.update(&id, draft).map(|e| e.title.clone()),
            None => self.store.add(draft).map(|e| e.title.clone()),
        };

        match result {
            Ok(title) => {
                self.set_status(format!("Saved \"{title}\""));
                self.mode = Mode::List;
                self.clamp_selection();
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn clamp_selection(&mut self) {
        let max = self.store.events().len();
        if self.selected >= max {
            self.selected = max.saturating_sub(1);
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
        self.message_age = 0;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
        self.message_age = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_app(dir: &TempDir) -> App {
        App::new(EventStore::load(dir.path().join("events.json")))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.apply(KeyAction::Char(c));
        }
    }

    fn fill_form(app: &mut App, title: &str) {
        type_str(app, title);
        app.apply(KeyAction::NextField);
        type_str(app, "A description");
        app.apply(KeyAction::NextField);
        type_str(app, "2030-06-01");
        app.apply(KeyAction::NextField);
        type_str(app, "09:30");
    }

    #[test]
    fn add_flow_creates_an_event() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);

        app.apply(KeyAction::StartAdd);
        fill_form(&mut app, "Standup");
        app.apply(KeyAction::SubmitForm);

        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.store.events().len(), 1);
        assert_eq!(app.store.events()[0].title, "Standup");
        assert!(app.status_message.is_some());
    }

    #[test]
    fn invalid_form_stays_open_with_state_intact() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);

        app.apply(KeyAction::StartAdd);
        type_str(&mut app, "Only a title");
        app.apply(KeyAction::SubmitForm);

        // Still in the form, fields untouched, nothing stored.
        match &app.mode {
            Mode::Form(form) => assert_eq!(form.fields[0], "Only a title"),
            other => panic!("expected form mode, got {other:?}"),
        }
        assert!(app.store.events().is_empty());
        assert!(app.error_message.as_deref().unwrap().contains("description"));
    }

    #[test]
    fn edit_keeps_the_id() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);

        app.apply(KeyAction::StartAdd);
        fill_form(&mut app, "Old title");
        app.apply(KeyAction::SubmitForm);
        let id = app.store.events()[0].id.clone();

        app.apply(KeyAction::StartEdit);
        // Clear the title field and retype it.
        for _ in 0.."Old title".len() {
            app.apply(KeyAction::Backspace);
        }
        type_str(&mut app, "New title");
        app.apply(KeyAction::SubmitForm);

        assert_eq!(app.store.events()[0].id, id);
        assert_eq!(app.store.events()[0].title, "New title");
    }

    #[test]
    fn delete_is_two_phase() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);

        app.apply(KeyAction::StartAdd);
        fill_form(&mut app, "Doomed");
        app.apply(KeyAction::SubmitForm);

        // Requesting alone does not delete.
        app.apply(KeyAction::RequestDelete);
        assert!(matches!(app.mode, Mode::ConfirmDelete { .. }));
        assert_eq!(app.store.events().len(), 1);

        // Aborting leaves the event alone.
        app.apply(KeyAction::CancelDelete);
        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.store.events().len(), 1);

        // Confirming commits.
        app.apply(KeyAction::RequestDelete);
        app.apply(KeyAction::ConfirmDelete);
        assert!(app.store.events().is_empty());
    }

    #[test]
    fn actions_on_an_empty_list_are_noops() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);

        app.apply(KeyAction::StartEdit);
        app.apply(KeyAction::RequestDelete);
        app.apply(KeyAction::Up);
        app.apply(KeyAction::Down);

        assert_eq!(app.mode, Mode::List);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn selection_is_clamped_after_delete() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);

        for title in ["One", "Two"] {
            app.apply(KeyAction::StartAdd);
            fill_form(&mut app, title);
            app.apply(KeyAction::SubmitForm);
        }

        app.apply(KeyAction::Down);
        assert_eq!(app.selected, 1);

        app.apply(KeyAction::RequestDelete);
        app.apply(KeyAction::ConfirmDelete);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn messages_expire_after_a_while() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir);

        app.set_status("Saved".to_string());
        for _ in 0..MESSAGE_TICKS {
            app.on_tick();
        }
        assert!(app.status_message.is_none());
    }
}
