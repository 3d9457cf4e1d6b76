//! Rendering tests against ratatui's `TestBackend`.
//!
//! These check what lands in the terminal buffer: headers, titles, popups,
//! and the status bar. Timestamps are rendered in local time, so assertions
//! avoid exact time strings.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use termtodo::app::App;
use termtodo::ui;
use termtodo_store::TaskStore;

fn press(app: &mut App<TaskStore>, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn add(app: &mut App<TaskStore>, title: &str) {
    press(app, KeyCode::Char('n'));
    for c in title.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

/// Draws one frame and returns the buffer as text, one line per row.
fn render(app: &App<TaskStore>) -> String {
    let backend = TestBackend::new(140, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn new_app() -> App<TaskStore> {
    App::new(TaskStore::open_in_memory().unwrap()).unwrap()
}

#[test]
fn test_empty_active_view_shows_headers() {
    let screen = render(&new_app());
    for header in ["ID", "Todo", "Completed", "Created At", "Completed At"] {
        assert!(screen.contains(header), "missing header {header}:\n{screen}");
    }
    assert!(screen.contains("Todos (0)"));
    assert!(screen.contains("termtodo v"));
    assert!(screen.contains("0 active"));
}

#[test]
fn test_rows_show_title_id_and_completion() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    add(&mut app, "Walk dog");
    press(&mut app, KeyCode::Char('t'));

    let screen = render(&app);
    assert!(screen.contains("Buy milk"));
    assert!(screen.contains("Walk dog"));
    assert!(screen.contains(&app.todos[0].id().to_string()));
    assert!(screen.contains("true"), "completed row:\n{screen}");
    assert!(screen.contains("false"), "incomplete row:\n{screen}");
    assert!(screen.contains(" ~ "), "unset completion placeholder");
}

#[test]
fn test_archive_view_shows_archived_rows() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('a'));

    let screen = render(&app);
    assert!(screen.contains("Archive (1)"));
    assert!(screen.contains("Archived At"));
    assert!(screen.contains("Buy milk"));
}

#[test]
fn test_entry_popup_shows_typed_text() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('n'));
    for c in "Half typed".chars() {
        press(&mut app, KeyCode::Char(c));
    }

    let screen = render(&app);
    assert!(screen.contains("Enter title for new todo"));
    assert!(screen.contains("Half typed"));
}

#[test]
fn test_duplicate_error_is_visible() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    add(&mut app, "Buy milk");

    let screen = render(&app);
    assert!(screen.contains("already exists"), "{screen}");
}

#[test]
fn test_help_overlay() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('?'));
    let screen = render(&app);
    assert!(screen.contains("Keys"));
    assert!(screen.contains("toggle completed"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    press(&mut app, KeyCode::Char('n'));

    let backend = TestBackend::new(10, 3);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::draw(frame, &app)).unwrap();
}
