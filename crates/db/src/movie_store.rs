//! PostgreSQL implementation of the catalog [`MovieStore`] contract.
//!
//! Predicates are rendered into a parameterised `WHERE` clause; orderings
//! come from a fixed column mapping, so no caller text is ever spliced into
//! SQL. An association change is planned and applied inside one
//! transaction holding the movie's row lock.

use async_trait::async_trait;
use reel_core::association::{
    ActorCredit, ActorDiff, AssociationBatch, AssociationChange, AssociationTarget, GenreDiff,
};
use reel_core::catalog::{MovieAssociations, MovieStore, ReferenceKind};
use reel_core::movie_filter::MoviePredicate;
use reel_core::movie_sort::{MovieOrdering, MovieSortField, SortDirection};
use reel_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::movie::Movie;
use crate::repositories::movie_repo::COLUMNS;

/// [`MovieStore`] backed by the `movies`, `genres_movies` and
/// `actors_movies` tables.
#[derive(Debug, Clone)]
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    type Movie = Movie;
    type Error = sqlx::Error;

    async fn count(&self, predicates: &[MoviePredicate]) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_movie_filter(predicates);
        let query = format!("SELECT COUNT(*)::BIGINT FROM movies {where_clause}");
        let q = sqlx::query_scalar::<_, i64>(&query);
        bind_movie_values_scalar(q, &bind_values)
            .fetch_one(&self.pool)
            .await
    }

    async fn query(
        &self,
        predicates: &[MoviePredicate],
        ordering: &MovieOrdering,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_movie_filter(predicates);
        let order_clause = order_by_clause(ordering);
        let query = format!(
            "SELECT {COLUMNS} FROM movies {where_clause} {order_clause} \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );
        let q = sqlx::query_as::<_, Movie>(&query);
        bind_movie_values(q, &bind_values)
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await
    }

    async fn existing_ids(
        &self,
        kind: ReferenceKind,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let table = match kind {
            ReferenceKind::Genre => "genres",
            ReferenceKind::Actor => "actors",
        };
        let query = format!("SELECT id FROM {table} WHERE id = ANY($1)");
        sqlx::query_scalar::<_, DbId>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
    }

    async fn reconcile(
        &self,
        movie_id: DbId,
        target: &AssociationTarget,
    ) -> Result<Option<AssociationBatch>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the movie serialises writers and blocks a concurrent
        // delete until this transaction ends.
        let locked =
            sqlx::query_scalar::<_, DbId>("SELECT id FROM movies WHERE id = $1 FOR UPDATE")
                .bind(movie_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let current = load_associations(&mut tx, movie_id).await?;
        let batch = target.plan(movie_id, &current);

        match &batch.change {
            AssociationChange::Genres(diff) => {
                apply_genre_diff(&mut tx, movie_id, diff).await?;
            }
            AssociationChange::Actors(diff) => {
                apply_actor_diff(&mut tx, movie_id, diff).await?;
            }
        }
        tx.commit().await?;
        Ok(Some(batch))
    }
}

async fn load_associations(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    movie_id: DbId,
) -> Result<MovieAssociations, sqlx::Error> {
    let genre_ids = sqlx::query_scalar::<_, DbId>(
        "SELECT genre_id FROM genres_movies WHERE movie_id = $1 ORDER BY genre_id",
    )
    .bind(movie_id)
    .fetch_all(&mut **tx)
    .await?;

    let actors = sqlx::query_as::<_, (DbId, String, i32)>(
        "SELECT actor_id, character_name, sort_order FROM actors_movies \
         WHERE movie_id = $1 ORDER BY sort_order, actor_id",
    )
    .bind(movie_id)
    .fetch_all(&mut **tx)
    .await?
    .into_iter()
    .map(|(actor_id, character, order)| ActorCredit {
        actor_id,
        character,
        order,
    })
    .collect();

    Ok(MovieAssociations { genre_ids, actors })
}

async fn apply_genre_diff(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    movie_id: DbId,
    diff: &GenreDiff,
) -> Result<(), sqlx::Error> {
    if !diff.to_remove.is_empty() {
        sqlx::query("DELETE FROM genres_movies WHERE movie_id = $1 AND genre_id = ANY($2)")
            .bind(movie_id)
            .bind(&diff.to_remove)
            .execute(&mut **tx)
            .await?;
    }
    if !diff.to_add.is_empty() {
        sqlx::query(
            "INSERT INTO genres_movies (movie_id, genre_id) \
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(movie_id)
        .bind(&diff.to_add)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn apply_actor_diff(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    movie_id: DbId,
    diff: &ActorDiff,
) -> Result<(), sqlx::Error> {
    if !diff.to_remove.is_empty() {
        sqlx::query("DELETE FROM actors_movies WHERE movie_id = $1 AND actor_id = ANY($2)")
            .bind(movie_id)
            .bind(&diff.to_remove)
            .execute(&mut **tx)
            .await?;
    }

    for credit in &diff.to_update {
        sqlx::query(
            "UPDATE actors_movies SET character_name = $3, sort_order = $4 \
             WHERE movie_id = $1 AND actor_id = $2",
        )
        .bind(movie_id)
        .bind(credit.actor_id)
        .bind(&credit.character)
        .bind(credit.order)
        .execute(&mut **tx)
        .await?;
    }

    for credit in &diff.to_add {
        sqlx::query(
            "INSERT INTO actors_movies (movie_id, actor_id, character_name, sort_order) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(movie_id)
        .bind(credit.actor_id)
        .bind(&credit.character)
        .bind(credit.order)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically built movie queries.
#[derive(Debug, Clone, PartialEq)]
enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
    Date(Date),
}

/// Render predicates as an AND-joined `WHERE` clause.
///
/// Returns `(where_clause, bind_values, next_bind_idx)`.
fn build_movie_filter(predicates: &[MoviePredicate]) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    for predicate in predicates {
        match predicate {
            MoviePredicate::TitleContains(text) => {
                conditions.push(format!("title ILIKE ${bind_idx}"));
                bind_values.push(BindValue::Text(format!("%{}%", crate::escape_like(text))));
            }
            MoviePredicate::InTheaters(flag) => {
                conditions.push(format!("in_theaters = ${bind_idx}"));
                bind_values.push(BindValue::Bool(*flag));
            }
            MoviePredicate::ReleasedAfter(date) => {
                conditions.push(format!("release_date > ${bind_idx}"));
                bind_values.push(BindValue::Date(*date));
            }
            MoviePredicate::HasGenre(genre_id) => {
                conditions.push(format!(
                    "EXISTS (SELECT 1 FROM genres_movies gm \
                     WHERE gm.movie_id = movies.id AND gm.genre_id = ${bind_idx})"
                ));
                bind_values.push(BindValue::BigInt(*genre_id));
            }
        }
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

fn order_by_clause(ordering: &MovieOrdering) -> String {
    let column = match ordering.field {
        MovieSortField::Id => "id",
        MovieSortField::Title => "title",
        MovieSortField::ReleaseDate => "release_date",
        MovieSortField::InTheaters => "in_theaters",
    };
    let direction = match ordering.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    if ordering.field == MovieSortField::Id {
        format!("ORDER BY id {direction}")
    } else {
        format!("ORDER BY {column} {direction}, id ASC")
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_movie_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_movie_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}
