//! Repository for the `actors` table.

use reel_core::types::DbId;
use sqlx::PgPool;

use crate::models::actor::{Actor, CreateActor, UpdateActor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, date_of_birth, picture, created_at, updated_at";

/// Provides CRUD and search operations for actors.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let query = format!(
            "INSERT INTO actors (name, date_of_birth, picture)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(&input.name)
            .bind(input.date_of_birth)
            .bind(&input.picture)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of actors, for the pagination count header.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM actors")
            .fetch_one(pool)
            .await
    }

    /// One page of actors ordered by name.
    pub async fn list(pool: &PgPool, skip: i64, take: i64) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors ORDER BY name, id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Actor>(&query)
            .bind(take)
            .bind(skip)
            .fetch_all(pool)
            .await
    }

    /// Actors whose name contains `name`, case-insensitively, ordered by name.
    pub async fn search_by_name(pool: &PgPool, name: &str) -> Result<Vec<Actor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actors
             WHERE name ILIKE $1
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(format!("%{}%", crate::escape_like(name)))
            .fetch_all(pool)
            .await
    }

    /// Update an actor. Only non-`None` fields in `input` are applied;
    /// `picture: Some(None)` clears the picture.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActor,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!(
            "UPDATE actors SET
                name = COALESCE($2, name),
                date_of_birth = COALESCE($3, date_of_birth),
                picture = CASE WHEN $4 THEN $5 ELSE picture END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.date_of_birth)
            .bind(input.picture.is_some())
            .bind(input.picture.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an actor and their movie credits. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
