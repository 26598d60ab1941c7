//! Actor entity model and DTOs.

use reel_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An actor row from the `actors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub date_of_birth: Date,
    /// Opaque reference to the actor's picture, if any.
    pub picture: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new actor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActor {
    pub name: String,
    pub date_of_birth: Date,
    pub picture: Option<String>,
}

/// DTO for updating an existing actor. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActor {
    pub name: Option<String>,
    pub date_of_birth: Option<Date>,
    /// `Some(None)` clears the stored reference.
    #[serde(default, deserialize_with = "crate::models::present")]
    pub picture: Option<Option<String>>,
}
