#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use studio_api::auth::jwt::JwtConfig;
use studio_api::auth::password::hash_password;
use studio_api::config::ServerConfig;
use studio_api::router::build_app_router;
use studio_api::state::AppState;
use studio_core::period::{local_today, parse_timezone, DEFAULT_TIMEZONE};
use studio_core::types::DbId;
use studio_db::models::art_type::CreateArtType;
use studio_db::models::user::{CreateUser, User};
use studio_db::repositories::{ArtTypeRepo, UserRepo};

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "studio-pass-123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_cleanup_interval_secs: 3600,
        database_url: "sqlite::memory:".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        bootstrap_admin: None,
    }
}

/// Build the full application router, with the production middleware
/// stack, over the given pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Today's date in the default studio timezone.
pub fn studio_today() -> NaiveDate {
    local_today(Utc::now(), parse_timezone(DEFAULT_TIMEZONE).unwrap())
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &SqlitePool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        display_name: format!("{username} display"),
        email: Some(format!("{username}@studio.test")),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

pub async fn create_art_type(pool: &SqlitePool, name: &str, points: i64) -> DbId {
    ArtTypeRepo::create(
        pool,
        &CreateArtType {
            name: name.to_string(),
            description: None,
            points,
            sort_order: None,
        },
    )
    .await
    .expect("art type creation should succeed")
    .id
}

/// Log in through the API and return the full JSON response.
pub async fn login(app: &Router, username: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK, "login for {username} failed");
    body_json(response).await
}

/// Log in and return only the access token.
pub async fn token_for(app: &Router, username: &str) -> String {
    login(app, username).await["access_token"]
        .as_str()
        .expect("access_token must be a string")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
