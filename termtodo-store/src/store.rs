//! SQLite-backed todo store.
//!
//! The [`TaskStore`] owns a single connection. Every write runs in its own
//! immediate transaction; deletion moves the row into the archive inside that
//! same transaction so a todo is never in both tables or in neither.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use termtodo_core::{
    ArchiveId, ArchivedTask, Clock, CompletionState, MAX_TITLE_LENGTH, SystemClock, Task, TaskId,
    validate_title,
};

use crate::error::StoreError;
use crate::schema;

const TASK_COLUMNS: &str = "id, title, created_at, completed_at";
const ARCHIVE_COLUMNS: &str = "archive_id, todo_id, title, created_at, completed_at, archived_at";

/// Durable store of active todos and their append-only archive.
///
/// Thread-safe via [`Mutex`], but the design assumes one writer: a single
/// terminal session. Other processes writing the same database file are only
/// coordinated by SQLite's own locking and surface as
/// [`StoreError::Storage`] when they collide.
pub struct TaskStore {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
    max_title_len: usize,
}

impl TaskStore {
    /// Opens (or creates) the database at `path` and applies the schema.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CreateDir`] if the parent directory cannot be
    /// created, or [`StoreError::Storage`] / [`StoreError::UnsupportedSchema`]
    /// if the database cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        schema::apply(&conn, true)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database. Contents vanish on drop.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::apply(&conn, false)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            clock: Arc::new(SystemClock),
            max_title_len: MAX_TITLE_LENGTH,
        }
    }

    /// Replaces the time source used for new timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the maximum accepted title length in characters.
    #[must_use]
    pub const fn with_max_title_len(mut self, max_title_len: usize) -> Self {
        self.max_title_len = max_title_len;
        self
    }

    /// Current time truncated to the stored precision, so values handed back
    /// to callers compare equal to what a later read returns.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    /// Creates a new incomplete todo.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTitle`] for a blank or over-long title and
    /// [`StoreError::DuplicateTitle`] if an active todo already has it.
    pub fn create(&self, title: &str) -> Result<Task, StoreError> {
        let title = validate_title(title, self.max_title_len)?;
        let task = Task::new(title, self.now());

        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO todos (id, title, completed, created_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                task.id().to_string(),
                task.title(),
                task.is_completed(),
                encode_ts(task.created_at()),
                task.completed_at().map(encode_ts),
            ],
        )
        .map_err(|e| StoreError::from_title_write(e, task.title()))?;
        tx.commit()?;
        Ok(task)
    }

    /// Fetches one active todo.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no active todo has `id`.
    pub fn get(&self, id: TaskId) -> Result<Task, StoreError> {
        let conn = self.conn.lock();
        fetch_task(&conn, id)?.ok_or(StoreError::NotFound(id))
    }

    /// All active todos, oldest first (ascending `created_at`, then insertion
    /// order).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on query or decoding failure.
    pub fn list_active(&self) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM todos ORDER BY created_at ASC, rowid ASC"
        ))?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// All archived todos, most recently archived first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] on query or decoding failure.
    pub fn list_archive(&self) -> Result<Vec<ArchivedTask>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ARCHIVE_COLUMNS} FROM todos_archive ORDER BY archived_at DESC, rowid DESC"
        ))?;
        let archived = stmt
            .query_map([], archived_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(archived)
    }

    /// Persists `task`'s title and completion against its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the todo is not active,
    /// [`StoreError::InvalidTitle`] or [`StoreError::DuplicateTitle`] if the
    /// title is rejected.
    pub fn update(&self, task: &Task) -> Result<(), StoreError> {
        let title = validate_title(task.title(), self.max_title_len)?;
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = write_task(&tx, task.id(), &title, task.completion())?;
        if changed == 0 {
            return Err(StoreError::NotFound(task.id()));
        }
        tx.commit()?;
        Ok(())
    }

    /// Flips completion of the todo with `id` and returns its new state.
    ///
    /// Read, toggle and write happen in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no active todo has `id`.
    pub fn toggle(&self, id: TaskId) -> Result<Task, StoreError> {
        let now = self.now();
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut task = fetch_task(&tx, id)?.ok_or(StoreError::NotFound(id))?;
        task.toggle(now);
        write_task(&tx, id, task.title(), task.completion())?;
        tx.commit()?;
        Ok(task)
    }

    /// Moves the todo with `id` into the archive.
    ///
    /// The archived copy is the persisted state at the time of deletion,
    /// stamped with `archived_at = now`. Removal and archival commit together.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no active todo has `id`.
    pub fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        let archived_at = self.now();
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let task = fetch_task(&tx, id)?.ok_or(StoreError::NotFound(id))?;
        let archived = task.archive(archived_at);

        tx.execute(
            "INSERT INTO todos_archive
             (archive_id, todo_id, title, completed, created_at, completed_at, archived_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                archived.archive_id.to_string(),
                archived.original_id.to_string(),
                archived.title,
                archived.is_completed(),
                encode_ts(archived.created_at),
                archived.completed_at().map(encode_ts),
                encode_ts(archived.archived_at),
            ],
        )
        .map_err(StoreError::classify)?;
        tx.execute("DELETE FROM todos WHERE id = ?1", params![id.to_string()])
            .map_err(StoreError::classify)?;
        tx.commit()?;
        Ok(())
    }

    /// Runs a raw SQL statement and returns the number of changed rows.
    ///
    /// Errors are translated like those of the typed operations: an attempt
    /// to update or delete archive rows yields
    /// [`StoreError::ArchiveImmutable`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ArchiveImmutable`] or [`StoreError::Storage`].
    pub fn execute_sql(&self, sql: &str) -> Result<usize, StoreError> {
        let conn = self.conn.lock();
        conn.execute(sql, []).map_err(StoreError::classify)
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("max_title_len", &self.max_title_len)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn fetch_task(conn: &Connection, id: TaskId) -> Result<Option<Task>, StoreError> {
    let task = conn
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM todos WHERE id = ?1"),
            params![id.to_string()],
            task_from_row,
        )
        .optional()?;
    Ok(task)
}

fn write_task(
    conn: &Connection,
    id: TaskId,
    title: &str,
    completion: CompletionState,
) -> Result<usize, StoreError> {
    conn.execute(
        "UPDATE todos SET title = ?1, completed = ?2, completed_at = ?3 WHERE id = ?4",
        params![
            title,
            completion.is_completed(),
            completion.completed_at().map(encode_ts),
            id.to_string(),
        ],
    )
    .map_err(|e| StoreError::from_title_write(e, title))
}

/// RFC 3339 with fixed microsecond precision: lexical order is time order.
fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_ts(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decode_opt_ts(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn decode_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<uuid::Uuid> {
    let raw: String = row.get(idx)?;
    uuid::Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task::restore(
        TaskId::from_uuid(decode_uuid(row, 0)?),
        row.get::<_, String>(1)?,
        CompletionState::from_completed_at(decode_opt_ts(row, 3)?),
        decode_ts(row, 2)?,
    ))
}

fn archived_from_row(row: &Row<'_>) -> rusqlite::Result<ArchivedTask> {
    Ok(ArchivedTask {
        archive_id: ArchiveId::from_uuid(decode_uuid(row, 0)?),
        original_id: TaskId::from_uuid(decode_uuid(row, 1)?),
        title: row.get(2)?,
        created_at: decode_ts(row, 3)?,
        completion: CompletionState::from_completed_at(decode_opt_ts(row, 4)?),
        archived_at: decode_ts(row, 5)?,
    })
}
