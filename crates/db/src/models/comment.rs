//! Movie comment model and DTOs.

use reel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub movie_id: DbId,
    /// Author, taken from the token subject at creation time.
    pub user_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting a comment. Movie and author come from the route and token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub body: String,
}
