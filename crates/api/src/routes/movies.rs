//! Route definitions for movies and their sub-resources.

use axum::routing::{get, post};
use axum::Router;

use super::comments;
use crate::handlers::movies;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /                  -> list (paged, title order)
/// POST   /                  -> create (admin)
/// GET    /filter            -> filter
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update (admin)
/// DELETE /{id}              -> delete (admin)
/// POST   /{id}/genres       -> assign_genres (admin)
/// POST   /{id}/actors       -> assign_actors (admin)
///
/// /{id}/comments/...        -> see comments::router
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list).post(movies::create))
        .route("/filter", get(movies::filter))
        .route(
            "/{id}",
            get(movies::get_by_id)
                .put(movies::update)
                .delete(movies::delete),
        )
        .route("/{id}/genres", post(movies::assign_genres))
        .route("/{id}/actors", post(movies::assign_actors))
        .nest("/{id}/comments", comments::router())
}
