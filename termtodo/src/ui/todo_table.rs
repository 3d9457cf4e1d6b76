//! Todo table rendering for the active and archive views.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use termtodo_core::{ArchivedTask, Task};
use termtodo_store::TodoRepository;

use super::{format_timestamp, theme};
use crate::app::{App, Mode, View};

/// Placeholder shown for an unset completion timestamp.
const NOT_COMPLETED: &str = " ~ ";

/// Render whichever list the app is showing.
pub fn render<R: TodoRepository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let (title, title_color, header, widths, rows) = match app.view {
        View::Active => (
            format!(" Todos ({}) ", app.todos.len()),
            theme::ACTIVE_TITLE,
            vec!["ID", "Todo", "Completed", "Created At", "Completed At"],
            vec![
                Constraint::Length(36),
                Constraint::Min(12),
                Constraint::Length(9),
                Constraint::Length(20),
                Constraint::Length(20),
            ],
            app.todos
                .iter()
                .map(|t| active_row(t, &app.timestamp_format))
                .collect::<Vec<_>>(),
        ),
        View::Archive => (
            format!(" Archive ({}) ", app.archive.len()),
            theme::ARCHIVE_TITLE,
            vec!["Todo", "Completed", "Created At", "Completed At", "Archived At"],
            vec![
                Constraint::Min(12),
                Constraint::Length(9),
                Constraint::Length(20),
                Constraint::Length(20),
                Constraint::Length(20),
            ],
            app.archive
                .iter()
                .map(|a| archive_row(a, &app.timestamp_format))
                .collect::<Vec<_>>(),
        ),
    };

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(title_color)))
        .borders(Borders::ALL)
        .border_style(if app.mode == Mode::Table {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(theme::highlighted()))
        .block(block)
        .row_highlight_style(theme::selected());

    let mut state = TableState::default();
    if app.row_count() > 0 {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn active_row<'a>(task: &'a Task, format: &str) -> Row<'a> {
    let style = if task.is_completed() {
        theme::completed()
    } else {
        theme::normal()
    };
    Row::new(vec![
        Cell::from(task.id().to_string()).style(theme::dimmed()),
        Cell::from(task.title()),
        Cell::from(task.is_completed().to_string()),
        Cell::from(format_timestamp(task.created_at(), format)),
        Cell::from(completed_at_text(task.completed_at(), format)),
    ])
    .style(style)
}

fn archive_row<'a>(archived: &'a ArchivedTask, format: &str) -> Row<'a> {
    Row::new(vec![
        Cell::from(archived.title.as_str()),
        Cell::from(archived.is_completed().to_string()),
        Cell::from(format_timestamp(archived.created_at, format)),
        Cell::from(completed_at_text(archived.completed_at(), format)),
        Cell::from(format_timestamp(archived.archived_at, format)),
    ])
    .style(theme::dimmed())
}

fn completed_at_text(at: Option<chrono::DateTime<chrono::Utc>>, format: &str) -> String {
    at.map_or_else(|| NOT_COMPLETED.to_string(), |ts| format_timestamp(ts, format))
}
