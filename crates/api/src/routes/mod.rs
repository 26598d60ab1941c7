pub mod actors;
pub mod comments;
pub mod genres;
pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /genres                                   list, create
/// /genres/{id}                              get, update, delete
///
/// /actors                                   list (paged), create
/// /actors/by-name/{name}                    name search
/// /actors/{id}                              get, update, delete
///
/// /movies                                   list (paged), create
/// /movies/filter                            filtered, sorted listing
/// /movies/{id}                              get (with genres, cast, comments), update, delete
/// /movies/{id}/genres                       replace genre set (POST)
/// /movies/{id}/actors                       replace cast (POST)
/// /movies/{id}/comments                     list, create
/// /movies/{id}/comments/{comment_id}        get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/genres", genres::router())
        .nest("/actors", actors::router())
        .nest("/movies", movies::router())
}
