//! Todo entity and lifecycle types for `termtodo`.
//!
//! Storage-agnostic: nothing in this crate knows about SQL. The store crate
//! persists these types and the terminal front end renders them.

pub mod clock;
pub mod task;
pub mod title;

pub use clock::{Clock, ManualClock, SystemClock};
pub use task::{ArchiveId, ArchivedTask, CompletionState, Task, TaskId};
pub use title::{MAX_TITLE_LENGTH, TitleError, validate_title};
