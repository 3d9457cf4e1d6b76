//! Terminal UI rendering.

pub mod entry_form;
pub mod help;
pub mod status_bar;
pub mod theme;
pub mod todo_table;

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use termtodo_store::TodoRepository;

use crate::app::{App, Mode};

/// Main draw function for the entire UI.
pub fn draw<R: TodoRepository>(frame: &mut Frame, app: &App<R>) {
    // Table on top, status bar at bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    todo_table::render(frame, chunks[0], app);
    status_bar::render(frame, chunks[1], app);

    if app.mode == Mode::Entry {
        entry_form::render(frame, frame.area(), app);
    } else if app.show_help {
        help::render(frame, frame.area());
    }
}

/// Format a UTC timestamp in local time with a chrono format string.
///
/// Falls back to RFC 3339 if `format` is not a valid chrono format.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>, format: &str) -> String {
    let local = ts.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        return local.to_rfc3339();
    }
    out
}

/// A rectangle `width` columns wide and `height` rows tall, centered in `area`
/// and clipped to it.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
