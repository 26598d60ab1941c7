#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use reel_api::auth::jwt::{Claims, JwtConfig};
use reel_api::config::ServerConfig;
use reel_api::router::build_app_router;
use reel_api::state::AppState;
use reel_core::roles::{ROLE_ADMIN, ROLE_USER};
use reel_core::types::DbId;
use sqlx::PgPool;
use tower::ServiceExt;

/// Id used as the token subject by [`admin_token`].
pub const ADMIN_ID: DbId = 1;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
        },
    }
}

/// Build the application exactly as `main.rs` does, on the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Sign a 15-minute token the way the identity service does.
pub fn mint_token(user_id: DbId, role: &str, secret: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + 15 * 60,
        iat: now,
        jti: uuid::Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn admin_token() -> String {
    mint_token(ADMIN_ID, ROLE_ADMIN, &test_config().jwt.secret)
}

pub fn user_token(user_id: DbId) -> String {
    mint_token(user_id, ROLE_USER, &test_config().jwt.secret)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a genre as admin and return its id.
pub async fn seed_genre(pool: &PgPool, name: &str) -> DbId {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/genres",
        serde_json::json!({ "name": name }),
        &admin_token(),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create an actor as admin and return its id.
pub async fn seed_actor(pool: &PgPool, name: &str) -> DbId {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/actors",
        serde_json::json!({ "name": name, "date_of_birth": "1964-09-02" }),
        &admin_token(),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a movie as admin and return its id.
pub async fn seed_movie(pool: &PgPool, title: &str, in_theaters: bool, release_date: &str) -> DbId {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/movies",
        serde_json::json!({
            "title": title,
            "in_theaters": in_theaters,
            "release_date": release_date,
        }),
        &admin_token(),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
