//! Field limits and validation for catalog entities.
//!
//! Used by the API layer before any write reaches storage. The limits match
//! the length checks in the database schema.

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum genre name length in characters.
pub const MAX_GENRE_NAME_LEN: usize = 150;

/// Maximum actor name length in characters.
pub const MAX_ACTOR_NAME_LEN: usize = 150;

/// Maximum movie title length in characters.
pub const MAX_MOVIE_TITLE_LEN: usize = 250;

/// Earliest accepted actor date of birth (inclusive).
pub fn min_date_of_birth() -> Date {
    Date::from_ymd_opt(1900, 1, 1).unwrap_or(Date::MIN)
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} too long: {len} chars (max {max_len})"
        )));
    }
    Ok(())
}

pub fn validate_genre_name(name: &str) -> Result<(), CoreError> {
    validate_required_text("Genre name", name, MAX_GENRE_NAME_LEN)
}

pub fn validate_actor_name(name: &str) -> Result<(), CoreError> {
    validate_required_text("Actor name", name, MAX_ACTOR_NAME_LEN)
}

pub fn validate_movie_title(title: &str) -> Result<(), CoreError> {
    validate_required_text("Movie title", title, MAX_MOVIE_TITLE_LEN)
}

/// Comment bodies are required but have no length cap.
pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    validate_required_text("Comment body", body, usize::MAX)
}

/// Reject dates of birth before 1900-01-01.
pub fn validate_date_of_birth(date_of_birth: Date) -> Result<(), CoreError> {
    let min = min_date_of_birth();
    if date_of_birth < min {
        return Err(CoreError::Validation(format!(
            "Date of birth can't be before {min}"
        )));
    }
    Ok(())
}
