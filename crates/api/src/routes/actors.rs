use axum::routing::get;
use axum::Router;

use crate::handlers::actors;
use crate::state::AppState;

/// Routes mounted at `/actors`.
///
/// ```text
/// GET    /                  -> list (paged)
/// POST   /                  -> create (admin)
/// GET    /by-name/{name}    -> get_by_name
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update (admin)
/// DELETE /{id}              -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(actors::list).post(actors::create))
        .route("/by-name/{name}", get(actors::get_by_name))
        .route(
            "/{id}",
            get(actors::get_by_id)
                .put(actors::update)
                .delete(actors::delete),
        )
}
