//! Title normalization and validation.

use thiserror::Error;

/// Default maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Reasons a title is rejected before it reaches storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    /// Title is empty or only whitespace.
    #[error("todo title cannot be empty")]
    Empty,
    /// Title exceeds the maximum length.
    #[error("todo title too long ({len} characters, max {max})")]
    TooLong {
        /// Length of the rejected title in characters.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Trims surrounding whitespace and checks the result against `max_len`.
///
/// Returns the normalized title that should be stored.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for blank input and [`TitleError::TooLong`]
/// when the trimmed title has more than `max_len` characters.
pub fn validate_title(raw: &str, max_len: usize) -> Result<String, TitleError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    let len = title.chars().count();
    if len > max_len {
        return Err(TitleError::TooLong { len, max: max_len });
    }
    Ok(title.to_string())
}
