//! Movie entity model, DTOs and association views.

use reel_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::comment::Comment;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub in_theaters: bool,
    pub release_date: Date,
    /// Opaque reference to the poster image, if any.
    pub poster: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    #[serde(default)]
    pub in_theaters: bool,
    pub release_date: Date,
    pub poster: Option<String>,
}

/// DTO for updating an existing movie. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub in_theaters: Option<bool>,
    pub release_date: Option<Date>,
    /// `Some(None)` clears the stored reference.
    #[serde(default, deserialize_with = "crate::models::present")]
    pub poster: Option<Option<String>>,
}

/// A genre attached to a movie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieGenre {
    pub id: DbId,
    pub name: String,
}

/// An actor credit on a movie, joined with the actor's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieActor {
    pub id: DbId,
    pub name: String,
    pub character: String,
    /// 1-based position in the cast.
    pub sort_order: i32,
}

/// A movie with its genres, ordered cast and comments.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: Vec<MovieGenre>,
    pub actors: Vec<MovieActor>,
    pub comments: Vec<Comment>,
}
