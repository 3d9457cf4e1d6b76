//! The todo entity and its completion state machine.
//!
//! A [`Task`] is created incomplete and changes completion only through
//! [`Task::toggle`]. Deleting a task turns its final state into an
//! [`ArchivedTask`], which never changes again.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// Unique identifier for an active todo, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier of an archive row. Distinct from the archived task's own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveId(Uuid);

impl ArchiveId {
    /// Creates a new time-ordered archive identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates an `ArchiveId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ArchiveId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ArchiveId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Whether a todo is done, and if so since when.
///
/// Folds the `completed` flag and the nullable `completed_at` column into one
/// value so that "completed without a timestamp" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionState {
    /// Not done yet.
    Incomplete,
    /// Done at the given instant.
    Completed {
        /// When the todo was marked complete.
        at: DateTime<Utc>,
    },
}

impl CompletionState {
    /// Builds the state from the persisted `completed_at` column.
    #[must_use]
    pub const fn from_completed_at(completed_at: Option<DateTime<Utc>>) -> Self {
        match completed_at {
            Some(at) => Self::Completed { at },
            None => Self::Incomplete,
        }
    }

    /// `true` for [`CompletionState::Completed`].
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Completion timestamp, `None` while incomplete.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Completed { at } => Some(*at),
            Self::Incomplete => None,
        }
    }

    /// The state after one toggle at `now`.
    #[must_use]
    pub const fn toggled(self, now: DateTime<Utc>) -> Self {
        match self {
            Self::Incomplete => Self::Completed { at: now },
            Self::Completed { .. } => Self::Incomplete,
        }
    }
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "incomplete"),
            Self::Completed { .. } => write!(f, "completed"),
        }
    }
}

/// An active todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    completion: CompletionState,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a fresh, incomplete todo stamped with `created_at`.
    ///
    /// The title is taken as given; normalization happens in
    /// [`validate_title`](crate::validate_title) before this is called.
    #[must_use]
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            completion: CompletionState::Incomplete,
            created_at,
        }
    }

    /// Rebuilds a todo from persisted fields.
    #[must_use]
    pub fn restore(
        id: TaskId,
        title: impl Into<String>,
        completion: CompletionState,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            completion,
            created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn completion(&self) -> CompletionState {
        self.completion
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completion.is_completed()
    }

    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completion.completed_at()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flips completion. Completing stamps `now`; un-completing clears it.
    pub const fn toggle(&mut self, now: DateTime<Utc>) {
        self.completion = self.completion.toggled(now);
    }

    /// [`toggle`](Self::toggle) using `clock` for the timestamp.
    pub fn toggle_with(&mut self, clock: &dyn Clock) {
        self.toggle(clock.now());
    }

    /// Snapshot of this todo as it would be archived at `archived_at`.
    #[must_use]
    pub fn archive(&self, archived_at: DateTime<Utc>) -> ArchivedTask {
        ArchivedTask {
            archive_id: ArchiveId::new(),
            original_id: self.id,
            title: self.title.clone(),
            completion: self.completion,
            created_at: self.created_at,
            archived_at,
        }
    }
}

/// The final state of a deleted todo. Never modified after it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedTask {
    /// Identifier of the archive row.
    pub archive_id: ArchiveId,
    /// Identifier the todo had while active.
    pub original_id: TaskId,
    /// Title at deletion time.
    pub title: String,
    /// Completion at deletion time.
    pub completion: CompletionState,
    /// When the original todo was created.
    pub created_at: DateTime<Utc>,
    /// When the todo was deleted and archived.
    pub archived_at: DateTime<Utc>,
}

impl ArchivedTask {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completion.is_completed()
    }

    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completion.completed_at()
    }
}
