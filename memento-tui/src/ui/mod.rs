//! Ratatui rendering for the list view and modals.

mod confirm;
mod form;

pub use confirm::render_confirm;
pub use form::render_form;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::{App, Mode};

/// Main render function: list view plus whichever modal is open.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Event list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_list(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);

    match &app.mode {
        Mode::List => {}
        Mode::Form(form) => render_form(frame, form),
        Mode::ConfirmDelete { title, .. } => render_confirm(frame, title),
    }
}

/// The event list with title, date/time, and description per row.
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let events = app.store.events();

    let title = format!(
        " memento — {} event{}, {} reminder{} pending ",
        events.len(),
        if events.len() == 1 { "" } else { "s" },
        app.pending_count(),
        if app.pending_count() == 1 { "" } else { "s" },
    );

    let items: Vec<ListItem> = events
        .iter()
        .map(|event| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    event.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} {}", event.date, event.time),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("  "),
                Span::styled(event.description.clone(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !events.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Transient messages, key hints, and the notification warning.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let message = if let Some(err) = &app.error_message {
        Span::styled(format!(" {err} "), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {status} "), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let notify_warning = if app.notifications_available {
        Span::raw("")
    } else {
        Span::styled(
            " notifications unavailable ",
            Style::default().fg(Color::Yellow),
        )
    };

    let hints = match &app.mode {
        Mode::List => " a:Add Enter:Edit d:Delete q:Quit ",
        Mode::Form(_) => " Tab:Next field Enter:Save Esc:Cancel ",
        Mode::ConfirmDelete { .. } => " y:Delete n:Keep ",
    };

    let line = Line::from(vec![
        message,
        notify_warning,
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Black)),
        area,
    );
}

/// A centered rect for modals, sized in absolute rows/cols and clamped to
/// the frame.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
