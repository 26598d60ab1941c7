//! Handlers for the `/movies` resource, including filtered listing and
//! genre/actor assignment.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use reel_core::association::{missing_ids, ActorCasting};
use reel_core::catalog::{self, ReferenceKind};
use reel_core::error::CoreError;
use reel_core::types::DbId;
use reel_core::validation::validate_movie_title;
use reel_db::models::movie::{CreateMovie, Movie, MovieDetails, UpdateMovie};
use reel_db::repositories::{CommentRepo, MovieRepo};
use reel_db::{DbPool, PgMovieStore};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{MovieFilterParams, PaginationParams};
use crate::response::{DataResponse, MetadataHeaders};
use crate::state::AppState;

/// One entry of the cast list posted to `/movies/{id}/actors`. List
/// position decides billing order.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignActor {
    pub actor_id: DbId,
    #[serde(default)]
    pub character: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Movie",
        id,
    })
}

/// Fail with 404 unless the movie exists.
pub(crate) async fn ensure_movie_exists(pool: &DbPool, id: DbId) -> AppResult<()> {
    if MovieRepo::exists(pool, id).await? {
        Ok(())
    } else {
        Err(not_found(id))
    }
}

/// Fail with 400 listing every requested id that does not exist.
async fn ensure_references_exist(
    store: &PgMovieStore,
    kind: ReferenceKind,
    requested: &[DbId],
) -> AppResult<()> {
    let existing = catalog::existing_ids(store, kind, requested).await?;
    let missing = missing_ids(requested, &existing);
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::Core(CoreError::InvalidReference {
        entity: kind.entity(),
        ids: missing,
    }))
}

/// GET /api/v1/movies?page=&recordsPerPage=
///
/// Ordered by title; total count in the `totalAmountOfRecord` header.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<(HeaderMap, Json<DataResponse<Vec<Movie>>>)> {
    let pagination = params.to_pagination()?;
    let store = PgMovieStore::new(state.pool.clone());

    let mut headers = MetadataHeaders::default();
    let movies = catalog::list_movies(&store, pagination, &mut headers).await?;
    Ok((headers.into_inner(), Json(DataResponse { data: movies })))
}

/// GET /api/v1/movies/filter
///
/// Title, genre, in-theaters and upcoming-release filters with optional
/// ordering. An unknown `orderByField` falls back to title order.
pub async fn filter(
    State(state): State<AppState>,
    Query(params): Query<MovieFilterParams>,
) -> AppResult<(HeaderMap, Json<DataResponse<Vec<Movie>>>)> {
    let filter = params.to_filter()?;
    let store = PgMovieStore::new(state.pool.clone());
    let today = chrono::Utc::now().date_naive();

    let mut headers = MetadataHeaders::default();
    let movies = catalog::filter_movies(&store, &filter, today, &mut headers).await?;
    Ok((headers.into_inner(), Json(DataResponse { data: movies })))
}

/// GET /api/v1/movies/{id}
///
/// The movie with its genres, billed cast and comments.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovieDetails>>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let genres = MovieRepo::list_genres(&state.pool, id).await?;
    let actors = MovieRepo::list_actors(&state.pool, id).await?;
    let comments = CommentRepo::list_for_movie(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: MovieDetails {
            movie,
            genres,
            actors,
            comments,
        },
    }))
}

/// POST /api/v1/movies
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<Movie>>)> {
    validate_movie_title(&input.title)?;
    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, user_id = admin.user_id, "Movie created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// PUT /api/v1/movies/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<DataResponse<Movie>>> {
    if let Some(title) = &input.title {
        validate_movie_title(title)?;
    }
    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(movie_id = id, user_id = admin.user_id, "Movie updated");
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(movie_id = id, user_id = admin.user_id, "Movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/movies/{id}/genres
///
/// Body: JSON array of genre ids. Replaces the movie's genre set.
pub async fn assign_genres(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(genre_ids): Json<Vec<DbId>>,
) -> AppResult<StatusCode> {
    ensure_movie_exists(&state.pool, id).await?;
    let store = PgMovieStore::new(state.pool.clone());

    ensure_references_exist(&store, ReferenceKind::Genre, &genre_ids).await?;
    catalog::assign_genres(&store, id, &genre_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/movies/{id}/actors
///
/// Body: ordered JSON array of `{ actor_id, character }`. Replaces the
/// movie's cast; billing order follows array order starting at 1.
pub async fn assign_actors(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(cast): Json<Vec<AssignActor>>,
) -> AppResult<StatusCode> {
    ensure_movie_exists(&state.pool, id).await?;
    let store = PgMovieStore::new(state.pool.clone());

    let actor_ids: Vec<DbId> = cast.iter().map(|a| a.actor_id).collect();
    ensure_references_exist(&store, ReferenceKind::Actor, &actor_ids).await?;

    let castings = cast
        .into_iter()
        .map(|a| ActorCasting {
            actor_id: a.actor_id,
            character: a.character,
        })
        .collect();
    catalog::assign_actors(&store, id, castings).await?;
    Ok(StatusCode::NO_CONTENT)
}
