//! The data-access surface the terminal front end talks to.

use termtodo_core::{ArchivedTask, Task, TaskId};

use crate::error::StoreError;
use crate::store::TaskStore;

/// Todo operations exposed to presentation code.
///
/// The front end holds one of these and never touches SQL. Every call is a
/// synchronous, complete unit of work: when it returns `Ok`, the change is
/// durable.
pub trait TodoRepository {
    /// Creates a todo titled `title`.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateTitle`] if an active todo already has the title,
    /// [`StoreError::InvalidTitle`] if it is blank or too long.
    fn create_todo(&self, title: &str) -> Result<Task, StoreError>;

    /// Active todos, oldest first.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] on engine failure.
    fn list_active_todos(&self) -> Result<Vec<Task>, StoreError>;

    /// Archived todos, most recently archived first.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] on engine failure.
    fn list_archived_todos(&self) -> Result<Vec<ArchivedTask>, StoreError>;

    /// Flips completion of the todo with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not an active todo.
    fn toggle_todo(&self, id: TaskId) -> Result<Task, StoreError>;

    /// Archives and removes the todo with `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `id` is not an active todo.
    fn delete_todo(&self, id: TaskId) -> Result<(), StoreError>;
}

impl TodoRepository for TaskStore {
    fn create_todo(&self, title: &str) -> Result<Task, StoreError> {
        self.create(title)
    }

    fn list_active_todos(&self) -> Result<Vec<Task>, StoreError> {
        self.list_active()
    }

    fn list_archived_todos(&self) -> Result<Vec<ArchivedTask>, StoreError> {
        self.list_archive()
    }

    fn toggle_todo(&self, id: TaskId) -> Result<Task, StoreError> {
        self.toggle(id)
    }

    fn delete_todo(&self, id: TaskId) -> Result<(), StoreError> {
        self.delete(id)
    }
}

impl<R: TodoRepository + ?Sized> TodoRepository for std::sync::Arc<R> {
    fn create_todo(&self, title: &str) -> Result<Task, StoreError> {
        (**self).create_todo(title)
    }

    fn list_active_todos(&self) -> Result<Vec<Task>, StoreError> {
        (**self).list_active_todos()
    }

    fn list_archived_todos(&self) -> Result<Vec<ArchivedTask>, StoreError> {
        (**self).list_archived_todos()
    }

    fn toggle_todo(&self, id: TaskId) -> Result<Task, StoreError> {
        (**self).toggle_todo(id)
    }

    fn delete_todo(&self, id: TaskId) -> Result<(), StoreError> {
        (**self).delete_todo(id)
    }
}
