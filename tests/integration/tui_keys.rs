//! Integration tests for driving the todo list from the keyboard.
//!
//! Each test feeds key events into an [`App`] backed by a private in-memory
//! store and checks both the app state and what the store persisted.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termtodo::app::{App, Mode, StatusLevel, View};
use termtodo_store::{TaskStore, TodoRepository};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn new_app() -> App<TaskStore> {
    App::new(TaskStore::open_in_memory().expect("open in-memory store")).expect("load app")
}

fn press(app: &mut App<TaskStore>, code: KeyCode) {
    app.handle_key_event(key(code));
}

/// Opens the entry form, types `title`, and submits it.
fn add(app: &mut App<TaskStore>, title: &str) {
    press(app, KeyCode::Char('n'));
    for c in title.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

// =============================================================================
// Creating todos
// =============================================================================

#[test]
fn test_new_todo_is_created_and_selected() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    add(&mut app, "Walk dog");

    assert_eq!(app.mode, Mode::Table);
    assert!(app.input.is_empty());
    assert_eq!(app.todos.len(), 2);
    assert_eq!(app.selected, 1, "newest todo should be selected");
    assert_eq!(app.selected_todo().unwrap().title(), "Walk dog");

    let stored = app.repo().list_active_todos().unwrap();
    assert_eq!(stored, app.todos);
    assert!(stored.iter().all(|t| !t.is_completed()));
}

#[test]
fn test_duplicate_title_shows_error_and_keeps_input() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    add(&mut app, "Buy milk");

    assert_eq!(app.mode, Mode::Entry, "entry form stays open");
    assert_eq!(app.input, "Buy milk");
    let status = app.status.as_ref().expect("error status");
    assert_eq!(status.level, StatusLevel::Error);
    assert!(status.text.contains("already exists"), "{}", status.text);
    assert_eq!(app.repo().list_active_todos().unwrap().len(), 1);

    // Fix the title and resubmit.
    press(&mut app, KeyCode::Char('!'));
    assert!(app.status.is_none(), "editing clears the stale error");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Table);
    assert_eq!(app.todos.len(), 2);
}

#[test]
fn test_blank_input_is_ignored() {
    let mut app = new_app();
    add(&mut app, "   ");

    assert_eq!(app.mode, Mode::Entry);
    assert!(app.todos.is_empty());
    assert!(app.status.is_none());
}

#[test]
fn test_escape_cancels_entry() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Esc);

    assert_eq!(app.mode, Mode::Table);
    assert!(app.input.is_empty());
    assert_eq!(app.cursor_position, 0);
    assert!(!app.should_quit, "Esc in entry mode must not quit");
    assert!(app.todos.is_empty());
}

#[test]
fn test_new_from_archive_view_returns_to_active() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.view, View::Archive);
    add(&mut app, "From archive");
    assert_eq!(app.view, View::Active);
    assert_eq!(app.todos.len(), 1);
}

// =============================================================================
// Toggling
// =============================================================================

#[test]
fn test_toggle_marks_and_unmarks_selected() {
    let mut app = new_app();
    add(&mut app, "Buy milk");

    press(&mut app, KeyCode::Char('t'));
    let task = &app.todos[0];
    assert!(task.is_completed());
    assert!(task.completed_at().is_some());

    press(&mut app, KeyCode::Char(' '));
    let task = &app.todos[0];
    assert!(!task.is_completed());
    assert!(task.completed_at().is_none());
    assert_eq!(app.repo().list_active_todos().unwrap(), app.todos);
}

#[test]
fn test_toggle_in_archive_view_does_nothing() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Char('t'));

    assert!(!app.archive[0].is_completed());
    assert!(app.status.is_none());
}

// =============================================================================
// Deleting
// =============================================================================

#[test]
fn test_delete_moves_todo_to_archive() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    press(&mut app, KeyCode::Char('t'));
    press(&mut app, KeyCode::Char('d'));

    assert!(app.todos.is_empty());
    assert_eq!(app.archive.len(), 1);
    assert_eq!(app.archive[0].title, "Buy milk");
    assert!(app.archive[0].is_completed());
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Info);
    assert_eq!(status.text, "Archived 'Buy milk'");

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.view, View::Archive);
    assert_eq!(app.row_count(), 1);
}

#[test]
fn test_selection_clamped_after_deleting_last_row() {
    let mut app = new_app();
    add(&mut app, "one");
    add(&mut app, "two");
    add(&mut app, "three");
    assert_eq!(app.selected, 2);

    press(&mut app, KeyCode::Delete);
    assert_eq!(app.todos.len(), 2);
    assert_eq!(app.selected, 1);
    assert_eq!(app.selected_todo().unwrap().title(), "two");
}

#[test]
fn test_deleted_title_can_be_reused() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    press(&mut app, KeyCode::Char('d'));
    add(&mut app, "Buy milk");

    assert_eq!(app.mode, Mode::Table);
    assert_eq!(app.todos.len(), 1);
    assert_eq!(app.archive.len(), 1);
    assert_ne!(app.todos[0].id(), app.archive[0].original_id);
}

// =============================================================================
// Navigation, views, help, quit
// =============================================================================

#[test]
fn test_navigation_keys_move_selection() {
    let mut app = new_app();
    add(&mut app, "one");
    add(&mut app, "two");
    add(&mut app, "three");

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.selected, 0);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.selected, 1);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.selected, 2);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.selected, 1);
    press(&mut app, KeyCode::End);
    assert_eq!(app.selected, 2);
    press(&mut app, KeyCode::Home);
    assert_eq!(app.selected, 0);
}

#[test]
fn test_switching_view_resets_selection() {
    let mut app = new_app();
    add(&mut app, "one");
    add(&mut app, "two");
    assert_eq!(app.selected, 1);

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.view, View::Archive);
    assert_eq!(app.selected, 0);
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.view, View::Active);
}

#[test]
fn test_help_toggles_and_closes_on_entry() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.show_help);
    press(&mut app, KeyCode::Char('?'));
    assert!(!app.show_help);

    press(&mut app, KeyCode::Char('?'));
    press(&mut app, KeyCode::Char('n'));
    assert!(!app.show_help);
    assert_eq!(app.mode, Mode::Entry);
}

#[test]
fn test_quit_keys() {
    let mut app = new_app();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);

    let mut app = new_app();
    press(&mut app, KeyCode::Esc);
    assert!(app.should_quit);
}

#[test]
fn test_status_clears_on_next_key() {
    let mut app = new_app();
    add(&mut app, "Buy milk");
    assert!(app.status.is_some());
    press(&mut app, KeyCode::Char('j'));
    assert!(app.status.is_none());
}
