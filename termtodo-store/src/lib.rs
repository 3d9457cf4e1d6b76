//! `termtodo` store library.
//!
//! Persists todos in SQLite with a write-once archive table. The archive's
//! immutability is enforced by triggers inside the database, not by this
//! crate's API alone.

pub mod error;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{ArchiveMutation, StoreError};
pub use repository::TodoRepository;
pub use store::TaskStore;
