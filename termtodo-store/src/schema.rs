//! Relational schema for active todos and the write-once archive.
//!
//! All statements are idempotent so the schema can be applied on every open.

use rusqlite::Connection;

use crate::error::StoreError;

/// Version stamped into `PRAGMA user_version` after the schema is applied.
pub const SCHEMA_VERSION: i64 = 1;

/// Prefix of the message raised by the archive triggers.
pub const ARCHIVE_READONLY_PREFIX: &str = "Archive table is readonly";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id           TEXT PRIMARY KEY,
    title        TEXT NOT NULL UNIQUE CHECK (length(trim(title)) > 0),
    completed    INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
    created_at   TEXT NOT NULL,
    completed_at TEXT NULL,
    CHECK ((completed = 1) = (completed_at IS NOT NULL))
);

CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos (created_at);

CREATE TABLE IF NOT EXISTS todos_archive (
    archive_id   TEXT PRIMARY KEY,
    todo_id      TEXT NOT NULL,
    title        TEXT NOT NULL,
    completed    INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
    created_at   TEXT NOT NULL,
    completed_at TEXT NULL,
    archived_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_todos_archive_archived_at ON todos_archive (archived_at);

CREATE TRIGGER IF NOT EXISTS prevent_archive_update
BEFORE UPDATE ON todos_archive
BEGIN
    SELECT RAISE(ABORT, 'Archive table is readonly - updates not allowed');
END;

-- Delete the database file to drop archives.
CREATE TRIGGER IF NOT EXISTS prevent_archive_delete
BEFORE DELETE ON todos_archive
BEGIN
    SELECT RAISE(ABORT, 'Archive table is readonly - deletes not allowed');
END;
";

/// Applies connection pragmas and the schema.
///
/// `file_backed` enables WAL journaling, which has no meaning for in-memory
/// databases.
///
/// # Errors
///
/// Returns [`StoreError::UnsupportedSchema`] if the database was stamped by a
/// newer build, or [`StoreError::Storage`] if any statement fails.
pub fn apply(conn: &Connection, file_backed: bool) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    if file_backed {
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    }

    let found: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    conn.execute_batch(SCHEMA)?;
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    Ok(())
}
