//! The add/edit form modal.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{FormState, FIELD_LABELS};
use crate::ui::centered_rect;

pub fn render_form(frame: &mut Frame, form: &FormState) {
    let title = if form.target.is_some() {
        " Edit event "
    } else {
        " New event "
    };

    // One bordered input per field plus the outer frame.
    let area = centered_rect(60, 4 + 3 * FIELD_LABELS.len() as u16, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (i, label) in FIELD_LABELS.iter().enumerate() {
        let focused = form.focus == i;
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let input = Paragraph::new(form.fields[i].as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {label} "))
                .border_style(style),
        );
        frame.render_widget(input, rows[i]);

        if focused {
            // Put the cursor at the end of the focused field.
            frame.set_cursor_position(Position::new(
                rows[i].x + 1 + form.fields[i].chars().count() as u16,
                rows[i].y + 1,
            ));
        }
    }
}
