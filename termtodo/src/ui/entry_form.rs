//! New-todo entry form, drawn as a popup over the table.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use termtodo_store::TodoRepository;

use super::{centered_rect, theme};
use crate::app::{App, StatusLevel};

/// Render the entry popup and place the terminal cursor in it.
pub fn render<R: TodoRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let popup = centered_rect(60, 5, area);

    let mut lines = vec![Line::from(Span::styled(app.input.as_str(), theme::normal()))];
    if let Some(status) = app.status.as_ref().filter(|s| s.level == StatusLevel::Error) {
        lines.push(Line::from(Span::styled(status.text.as_str(), theme::error())));
    }

    let block = Block::default()
        .title(Span::styled(
            " Enter title for new todo ",
            theme::panel_title(theme::ACTIVE_TITLE),
        ))
        .title_bottom(Span::styled(" Enter: add | Esc: cancel ", theme::dimmed()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);

    // Cursor sits after the border, offset by the typed characters.
    let max_x = popup.x + popup.width.saturating_sub(2);
    let offset = u16::try_from(app.cursor_position).unwrap_or(u16::MAX);
    let x = popup.x.saturating_add(1).saturating_add(offset).min(max_x);
    frame.set_cursor_position((x, popup.y + 1));
}
