//! Repository for the `movies` table and its association views.
//!
//! Filtered listing and association writes go through
//! [`crate::movie_store::PgMovieStore`].

use reel_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, MovieActor, MovieGenre, UpdateMovie};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, title, in_theaters, release_date, poster, created_at, updated_at";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, in_theaters, release_date, poster)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(input.in_theaters)
            .bind(input.release_date)
            .bind(&input.poster)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied;
    /// `poster: Some(None)` clears the poster.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let poster_provided = input.poster.is_some();
        let poster_value = input.poster.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE movies SET
                title = COALESCE($2, title),
                in_theaters = COALESCE($3, in_theaters),
                release_date = COALESCE($4, release_date),
                poster = CASE WHEN $5 THEN $6 ELSE poster END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.in_theaters)
            .bind(input.release_date)
            .bind(poster_provided)
            .bind(poster_value)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie with its associations and comments.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Genres attached to a movie, ordered by name.
    pub async fn list_genres(pool: &PgPool, movie_id: DbId) -> Result<Vec<MovieGenre>, sqlx::Error> {
        sqlx::query_as::<_, MovieGenre>(
            "SELECT g.id, g.name
             FROM genres_movies gm
             JOIN genres g ON g.id = gm.genre_id
             WHERE gm.movie_id = $1
             ORDER BY g.name, g.id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// The movie's cast in credit order.
    pub async fn list_actors(pool: &PgPool, movie_id: DbId) -> Result<Vec<MovieActor>, sqlx::Error> {
        sqlx::query_as::<_, MovieActor>(
            "SELECT a.id, a.name, am.character_name AS character, am.sort_order
             FROM actors_movies am
             JOIN actors a ON a.id = am.actor_id
             WHERE am.movie_id = $1
             ORDER BY am.sort_order, a.id",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }
}
