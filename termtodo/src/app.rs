//! Application state and event handling.
//!
//! `App` caches the active and archived lists from a [`TodoRepository`] and
//! reloads both after every mutation, so what is drawn is always what is
//! stored.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termtodo_core::{ArchivedTask, Task};
use termtodo_store::{StoreError, TodoRepository};

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the todo table (default).
    Table,
    /// Typing the title of a new todo.
    Entry,
}

/// Which list the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Active todos.
    Active,
    /// Archived (deleted) todos.
    Archive,
}

/// Severity of a status-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Confirmation of a successful action.
    Info,
    /// A failed action.
    Error,
}

/// One line of feedback shown in the status bar until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity, used for styling.
    pub level: StatusLevel,
}

/// Main application state.
pub struct App<R> {
    repo: R,
    /// Active todos, oldest first.
    pub todos: Vec<Task>,
    /// Archived todos, most recently archived first.
    pub archive: Vec<ArchivedTask>,
    /// Current input mode.
    pub mode: Mode,
    /// Which list is shown.
    pub view: View,
    /// Selected row in the current view.
    pub selected: usize,
    /// Title being typed in entry mode.
    pub input: String,
    /// Cursor position in input (character index).
    pub cursor_position: usize,
    /// Feedback from the last action.
    pub status: Option<StatusMessage>,
    /// Whether the key help overlay is shown.
    pub show_help: bool,
    /// Timestamp display format (chrono).
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<R: TodoRepository> App<R> {
    /// Create the app and load both lists from `repo`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the initial load fails.
    pub fn new(repo: R) -> Result<Self, StoreError> {
        let mut app = Self {
            repo,
            todos: Vec::new(),
            archive: Vec::new(),
            mode: Mode::Table,
            view: View::Active,
            selected: 0,
            input: String::new(),
            cursor_position: 0,
            status: None,
            show_help: false,
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            should_quit: false,
        };
        app.refresh()?;
        Ok(app)
    }

    /// Sets the chrono format used for timestamps in the table.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// The repository this app reads and writes.
    pub const fn repo(&self) -> &R {
        &self.repo
    }

    /// Reloads both lists and clamps the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either list cannot be read.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.todos = self.repo.list_active_todos()?;
        self.archive = self.repo.list_archived_todos()?;
        self.clamp_selection();
        Ok(())
    }

    /// Number of rows in the current view.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self.view {
            View::Active => self.todos.len(),
            View::Archive => self.archive.len(),
        }
    }

    /// The active todo under the cursor, if the active view is shown.
    #[must_use]
    pub fn selected_todo(&self) -> Option<&Task> {
        match self.view {
            View::Active => self.todos.get(self.selected),
            View::Archive => None,
        }
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Table => self.handle_table_key(key),
            Mode::Entry => self.handle_entry_key(key),
        }
    }

    /// Handle key event while navigating the table.
    fn handle_table_key(&mut self, key: KeyEvent) {
        self.status = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.row_count().saturating_sub(1);
            }
            KeyCode::Char('n') => self.open_entry(),
            KeyCode::Char('t' | ' ') => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('a') | KeyCode::Tab => self.switch_view(),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
    }

    /// Handle key event while typing a new title.
    fn handle_entry_key(&mut self, key: KeyEvent) {
        self.status = None;
        match key.code {
            KeyCode::Esc => self.close_entry(),
            KeyCode::Enter => self.submit_entry(),
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.input.chars().count(),
            _ => {}
        }
    }

    fn open_entry(&mut self) {
        self.view = View::Active;
        self.clamp_selection();
        self.mode = Mode::Entry;
        self.show_help = false;
    }

    fn close_entry(&mut self) {
        self.mode = Mode::Table;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Create a todo from the input. Blank input is ignored; on failure the
    /// input is kept so it can be corrected.
    fn submit_entry(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }

        match self.repo.create_todo(&self.input) {
            Ok(task) => {
                tracing::info!(id = %task.id(), title = task.title(), "todo created");
                let id = task.id();
                self.close_entry();
                self.reload();
                if let Some(idx) = self.todos.iter().position(|t| t.id() == id) {
                    self.selected = idx;
                }
                self.set_status(StatusLevel::Info, format!("Added '{}'", task.title()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed");
                self.set_status(StatusLevel::Error, e.to_string());
            }
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_todo().map(Task::id) else {
            return;
        };
        match self.repo.toggle_todo(id) {
            Ok(task) => {
                tracing::info!(id = %id, completed = task.is_completed(), "todo toggled");
                self.reload();
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "toggle failed");
                self.set_status(StatusLevel::Error, e.to_string());
                self.reload();
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some((id, title)) = self
            .selected_todo()
            .map(|t| (t.id(), t.title().to_string()))
        else {
            return;
        };
        match self.repo.delete_todo(id) {
            Ok(()) => {
                tracing::info!(id = %id, "todo archived");
                self.reload();
                self.set_status(StatusLevel::Info, format!("Archived '{title}'"));
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "delete failed");
                self.set_status(StatusLevel::Error, e.to_string());
                self.reload();
            }
        }
    }

    fn switch_view(&mut self) {
        self.view = match self.view {
            View::Active => View::Archive,
            View::Archive => View::Active,
        };
        self.selected = 0;
    }

    /// [`refresh`](Self::refresh), reporting failure in the status line.
    fn reload(&mut self) {
        if let Err(e) = self.refresh() {
            tracing::error!(error = %e, "reload failed");
            self.set_status(StatusLevel::Error, e.to_string());
        }
    }

    fn set_status(&mut self, level: StatusLevel, text: String) {
        self.status = Some(StatusMessage { text, level });
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.row_count().saturating_sub(1));
    }

    const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.row_count() {
            self.selected += 1;
        }
    }

    /// Byte offset of the character at `cursor_position`.
    fn cursor_byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        let idx = self.cursor_byte_index();
        self.input.insert(idx, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let idx = self.cursor_byte_index();
            self.input.remove(idx);
        }
    }

    /// Move cursor left.
    const fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right.
    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }
}
