use axum::routing::get;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes nested at `/movies/{id}/comments`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (authenticated)
/// GET    /{comment_id}    -> get_by_id
/// PUT    /{comment_id}    -> update (author only)
/// DELETE /{comment_id}    -> delete (author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comments::list).post(comments::create))
        .route(
            "/{comment_id}",
            get(comments::get_by_id)
                .put(comments::update)
                .delete(comments::delete),
        )
}
