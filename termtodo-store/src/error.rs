//! Typed failures of the todo store.
//!
//! Constraint violations raised by SQLite are translated into the variants
//! below so callers never have to inspect engine error text.

use std::fmt;
use std::path::PathBuf;

use rusqlite::ErrorCode;
use rusqlite::ffi;
use termtodo_core::{TaskId, TitleError};
use thiserror::Error;

/// Which write against the archive was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveMutation {
    /// An `UPDATE` of an archive row.
    Update,
    /// A `DELETE` of an archive row.
    Delete,
}

impl fmt::Display for ArchiveMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "updates"),
            Self::Delete => write!(f, "deletes"),
        }
    }
}

/// Errors returned by [`TaskStore`](crate::TaskStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An active todo already has this title.
    #[error("todo item '{0}' already exists")]
    DuplicateTitle(String),

    /// No active todo has this id.
    #[error("todo not found: {0}")]
    NotFound(TaskId),

    /// The storage engine refused to modify an archived row.
    #[error("archive is read-only: {0} not allowed")]
    ArchiveImmutable(ArchiveMutation),

    /// The title failed validation before reaching storage.
    #[error(transparent)]
    InvalidTitle(#[from] TitleError),

    /// The database file was written by a newer schema.
    #[error("unsupported schema version {found} (this build supports up to {supported})")]
    UnsupportedSchema {
        /// `user_version` found in the database.
        found: i64,
        /// Highest version this build understands.
        supported: i64,
    },

    /// The directory for the database file could not be created.
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        /// Directory that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Any other engine or I/O failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl StoreError {
    /// Translates an engine error raised while writing `title` to `todos`.
    ///
    /// A unique violation on `todos.title` becomes [`StoreError::DuplicateTitle`];
    /// everything else goes through [`StoreError::classify`].
    pub(crate) fn from_title_write(err: rusqlite::Error, title: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(code, msg) = &err
            && code.code == ErrorCode::ConstraintViolation
            && code.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
            && msg.as_deref().is_some_and(|m| m.contains("todos.title"))
        {
            return Self::DuplicateTitle(title.to_string());
        }
        Self::classify(err)
    }

    /// Translates an engine error with no title context.
    ///
    /// Aborts raised by the archive triggers become
    /// [`StoreError::ArchiveImmutable`]; anything else is
    /// [`StoreError::Storage`].
    pub(crate) fn classify(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, msg) = &err
            && code.code == ErrorCode::ConstraintViolation
        {
            let msg = msg.as_deref().unwrap_or_default();
            if code.extended_code == ffi::SQLITE_CONSTRAINT_TRIGGER
                && msg.starts_with(crate::schema::ARCHIVE_READONLY_PREFIX)
            {
                let mutation = if msg.contains("deletes") {
                    ArchiveMutation::Delete
                } else {
                    ArchiveMutation::Update
                };
                return Self::ArchiveImmutable(mutation);
            }
        }
        Self::Storage(err)
    }
}
