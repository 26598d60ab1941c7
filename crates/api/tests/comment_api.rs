//! HTTP-level tests for movie comments and author-only edits.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, post_json, post_json_auth, put_json_auth, seed_movie,
    user_token,
};
use sqlx::PgPool;

async fn post_comment(pool: &PgPool, movie: i64, user_id: i64, body: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/movies/{movie}/comments"),
        serde_json::json!({ "body": body }),
        &user_token(user_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_author_is_token_subject(pool: PgPool) {
    let movie = seed_movie(&pool, "Heat", false, "1995-12-15").await;
    let id = post_comment(&pool, movie, 77, "Great shootout").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/movies/{movie}/comments/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], 77);
    assert_eq!(json["data"]["movie_id"], movie);
    assert_eq!(json["data"]["body"], "Great shootout");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_comment_returns_401(pool: PgPool) {
    let movie = seed_movie(&pool, "Heat", false, "1995-12-15").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/movies/{movie}/comments"),
        serde_json::json!({ "body": "hi" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_on_missing_movie_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/movies/999999/comments",
        serde_json::json!({ "body": "hi" }),
        &user_token(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_author_may_edit_or_delete(pool: PgPool) {
    let movie = seed_movie(&pool, "Heat", false, "1995-12-15").await;
    let id = post_comment(&pool, movie, 5, "First!").await;
    let uri = format!("/api/v1/movies/{movie}/comments/{id}");

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        serde_json::json!({ "body": "hijacked" }),
        &user_token(6),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &user_token(6)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        serde_json::json!({ "body": "Edited" }),
        &user_token(5),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["body"], "Edited");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &user_token(5)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_is_scoped_to_its_movie(pool: PgPool) {
    let heat = seed_movie(&pool, "Heat", false, "1995-12-15").await;
    let ronin = seed_movie(&pool, "Ronin", false, "1998-09-25").await;
    let id = post_comment(&pool, heat, 5, "Classic").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/movies/{ronin}/comments/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/movies/{heat}")).await).await;
    assert_eq!(json["data"]["comments"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_comment_returns_400(pool: PgPool) {
    let movie = seed_movie(&pool, "Heat", false, "1995-12-15").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/movies/{movie}/comments"),
        serde_json::json!({ "body": "   " }),
        &user_token(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
