//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use termtodo_store::TodoRepository;

use super::theme;
use crate::app::{App, Mode, StatusLevel, View};

/// Render the status bar at the bottom of the screen.
pub fn render<R: TodoRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let help_text = match (app.mode, app.view) {
        (Mode::Entry, _) => "Enter: add | Esc: cancel",
        (Mode::Table, View::Active) => {
            "n: new | t: toggle | d: delete | a: archive | ?: help | q: quit"
        }
        (Mode::Table, View::Archive) => "a: back to todos | ↑↓/jk: navigate | q: quit",
    };

    let mut spans = vec![
        Span::styled(
            concat!("termtodo v", env!("CARGO_PKG_VERSION")),
            theme::bold(),
        ),
        Span::raw(format!(
            " | {} active · {} archived | ",
            app.todos.len(),
            app.archive.len()
        )),
    ];

    match &app.status {
        Some(status) if status.level == StatusLevel::Error => {
            spans.push(Span::styled(status.text.as_str(), theme::error()));
        }
        Some(status) => spans.push(Span::styled(status.text.as_str(), theme::normal())),
        None => spans.push(Span::styled(help_text, theme::dimmed())),
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
