//! Handlers for comments nested under `/movies/{id}/comments`.
//!
//! Reading is public. Posting needs any authenticated user; editing and
//! deleting are limited to the comment's author.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reel_core::error::CoreError;
use reel_core::types::DbId;
use reel_core::validation::validate_comment_body;
use reel_db::models::comment::{Comment, CreateComment, UpdateComment};
use reel_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::movies::ensure_movie_exists;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comment",
        id,
    })
}

/// Load a comment and check the caller wrote it.
async fn find_own_comment(
    state: &AppState,
    user: &AuthUser,
    movie_id: DbId,
    id: DbId,
) -> AppResult<Comment> {
    let comment = CommentRepo::find_by_id(&state.pool, movie_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if comment.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author may change this comment".into(),
        )));
    }
    Ok(comment)
}

/// GET /api/v1/movies/{movie_id}/comments
pub async fn list(
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    ensure_movie_exists(&state.pool, movie_id).await?;
    let comments = CommentRepo::list_for_movie(&state.pool, movie_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// GET /api/v1/movies/{movie_id}/comments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((movie_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Comment>>> {
    ensure_movie_exists(&state.pool, movie_id).await?;
    let comment = CommentRepo::find_by_id(&state.pool, movie_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: comment }))
}

/// POST /api/v1/movies/{movie_id}/comments
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(movie_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    ensure_movie_exists(&state.pool, movie_id).await?;
    validate_comment_body(&input.body)?;

    let comment = CommentRepo::create(&state.pool, movie_id, user.user_id, &input).await?;
    tracing::info!(
        comment_id = comment.id,
        movie_id,
        user_id = user.user_id,
        "Comment posted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// PUT /api/v1/movies/{movie_id}/comments/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path((movie_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<DataResponse<Comment>>> {
    ensure_movie_exists(&state.pool, movie_id).await?;
    validate_comment_body(&input.body)?;
    find_own_comment(&state, &user, movie_id, id).await?;

    let comment = CommentRepo::update(&state.pool, movie_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(comment_id = id, movie_id, user_id = user.user_id, "Comment edited");
    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /api/v1/movies/{movie_id}/comments/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path((movie_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_movie_exists(&state.pool, movie_id).await?;
    find_own_comment(&state, &user, movie_id, id).await?;

    if !CommentRepo::delete(&state.pool, movie_id, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(comment_id = id, movie_id, user_id = user.user_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
