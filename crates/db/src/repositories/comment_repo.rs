//! Repository for the `comments` table.
//!
//! Every lookup is scoped to a movie so a comment id from another movie is
//! treated as absent.

use reel_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CreateComment, UpdateComment};

const COLUMNS: &str = "id, movie_id, user_id, body, created_at, updated_at";

pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        pool: &PgPool,
        movie_id: DbId,
        user_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (movie_id, user_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(movie_id)
            .bind(user_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        movie_id: DbId,
        id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1 AND movie_id = $2");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a movie, oldest first.
    pub async fn list_for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM comments WHERE movie_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Comment>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        movie_id: DbId,
        id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET body = $3
             WHERE id = $1 AND movie_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(movie_id)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, movie_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND movie_id = $2")
            .bind(id)
            .bind(movie_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
