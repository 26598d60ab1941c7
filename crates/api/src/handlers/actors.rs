//! Handlers for the `/actors` resource.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use reel_core::catalog::MetadataSink;
use reel_core::error::CoreError;
use reel_core::pagination::TOTAL_COUNT_HEADER;
use reel_core::types::DbId;
use reel_core::validation::{validate_actor_name, validate_date_of_birth};
use reel_db::models::actor::{Actor, CreateActor, UpdateActor};
use reel_db::repositories::ActorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, MetadataHeaders};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Actor",
        id,
    })
}

/// GET /api/v1/actors?page=&recordsPerPage=
///
/// Ordered by name. The total actor count is returned in the
/// `totalAmountOfRecord` header.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<(HeaderMap, Json<DataResponse<Vec<Actor>>>)> {
    let pagination = params.to_pagination()?;

    let total = ActorRepo::count(&state.pool).await?;
    let mut headers = MetadataHeaders::default();
    headers.set_header(TOTAL_COUNT_HEADER, total.to_string());

    let actors = ActorRepo::list(&state.pool, pagination.skip(), pagination.take()).await?;
    Ok((headers.into_inner(), Json(DataResponse { data: actors })))
}

/// GET /api/v1/actors/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Actor>>>> {
    let actors = ActorRepo::search_by_name(&state.pool, &name).await?;
    Ok(Json(DataResponse { data: actors }))
}

/// GET /api/v1/actors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Actor>>> {
    let actor = ActorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: actor }))
}

/// POST /api/v1/actors
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateActor>,
) -> AppResult<(StatusCode, Json<DataResponse<Actor>>)> {
    validate_actor_name(&input.name)?;
    validate_date_of_birth(input.date_of_birth)?;

    let actor = ActorRepo::create(&state.pool, &input).await?;
    tracing::info!(actor_id = actor.id, user_id = admin.user_id, "Actor created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: actor })))
}

/// PUT /api/v1/actors/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActor>,
) -> AppResult<Json<DataResponse<Actor>>> {
    if let Some(name) = &input.name {
        validate_actor_name(name)?;
    }
    if let Some(dob) = input.date_of_birth {
        validate_date_of_birth(dob)?;
    }

    let actor = ActorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(actor_id = id, user_id = admin.user_id, "Actor updated");
    Ok(Json(DataResponse { data: actor }))
}

/// DELETE /api/v1/actors/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ActorRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(actor_id = id, user_id = admin.user_id, "Actor deleted");
    Ok(StatusCode::NO_CONTENT)
}
