//! HTTP-level integration tests for dashboards and work sessions.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{
    body_json, create_art_type, create_user, get_auth, post_auth, post_json_auth, studio_today,
    token_for,
};
use serde_json::json;
use sqlx::SqlitePool;
use studio_db::repositories::UserRepo;

/// Log a demand through the API for the token's owner.
async fn log_demand(
    app: &axum::Router,
    token: &str,
    art_type_id: i64,
    quantity: i64,
    work_date: chrono::NaiveDate,
) {
    let body = json!({
        "title": "Work",
        "work_date": work_date.to_string(),
        "items": [{ "art_type_id": art_type_id, "quantity": quantity }],
    });
    let response = post_json_auth(app.clone(), "/api/v1/demands", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// The admin summary totals today's work and compares with yesterday.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_compares_with_previous_period(pool: SqlitePool) {
    create_user(&pool, "boss", "admin").await;
    create_user(&pool, "ana", "designer").await;
    create_user(&pool, "bia", "designer").await;
    create_user(&pool, "caio", "designer").await;
    let post = create_art_type(&pool, "Post", 5).await;
    let app = common::build_test_app(pool);
    let ana = token_for(&app, "ana").await;
    let bia = token_for(&app, "bia").await;
    let boss = token_for(&app, "boss").await;
    let today = studio_today();

    log_demand(&app, &ana, post, 2, today).await; // 10
    log_demand(&app, &bia, post, 4, today).await; // 20
    log_demand(&app, &ana, post, 4, today - Duration::days(1)).await; // 20

    let response = get_auth(app, "/api/v1/dashboard/summary?period=today", &boss).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["period"]["kind"], "today");
    assert_eq!(data["totals"]["points"], 30);
    assert_eq!(data["totals"]["demands"], 2);
    assert_eq!(data["previous_totals"]["points"], 20);
    assert_eq!(data["points_change_pct"], 50.0);
    assert_eq!(data["daily_points_goal"], 10);

    let designers = data["designers"].as_array().unwrap();
    assert_eq!(designers.len(), 3, "designers without work are listed too");
    assert_eq!(designers[0]["designer_name"], "bia display");
    assert_eq!(designers[0]["points"], 20);
    assert_eq!(designers[2]["points"], 0);
}

/// With no previous activity the change percentages are null.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_without_baseline(pool: SqlitePool) {
    create_user(&pool, "boss", "admin").await;
    create_user(&pool, "ana", "designer").await;
    let post = create_art_type(&pool, "Post", 5).await;
    let app = common::build_test_app(pool);
    let ana = token_for(&app, "ana").await;
    let boss = token_for(&app, "boss").await;

    log_demand(&app, &ana, post, 1, studio_today()).await;

    let json = body_json(get_auth(app, "/api/v1/dashboard/summary", &boss).await).await;
    assert_eq!(json["data"]["period"]["kind"], "month");
    assert!(json["data"]["points_change_pct"].is_null());
}

/// Work by a designer deactivated later still counts in studio totals.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_summary_keeps_work_of_deactivated_designers(pool: SqlitePool) {
    create_user(&pool, "boss", "admin").await;
    create_user(&pool, "ana", "designer").await;
    let bia = create_user(&pool, "bia", "designer").await;
    let post = create_art_type(&pool, "Post", 5).await;
    let app = common::build_test_app(pool.clone());
    let ana = token_for(&app, "ana").await;
    let bia_token = token_for(&app, "bia").await;
    let boss = token_for(&app, "boss").await;
    let today = studio_today();

    log_demand(&app, &ana, post, 1, today).await; // 5
    log_demand(&app, &bia_token, post, 2, today).await; // 10
    UserRepo::deactivate(&pool, bia.id).await.unwrap();

    let json = body_json(get_auth(app, "/api/v1/dashboard/summary?period=today", &boss).await).await;
    let data = &json["data"];
    assert_eq!(data["totals"]["points"], 15);
    assert_eq!(data["totals"]["demands"], 2);
    assert_eq!(data["designers"].as_array().unwrap().len(), 1);
}

/// Designers cannot see the studio summary but get their own.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_designer_summary_scope(pool: SqlitePool) {
    create_user(&pool, "ana", "designer").await;
    create_user(&pool, "bia", "designer").await;
    let post = create_art_type(&pool, "Post", 3).await;
    let app = common::build_test_app(pool);
    let ana = token_for(&app, "ana").await;
    let bia = token_for(&app, "bia").await;
    let today = studio_today();

    log_demand(&app, &ana, post, 2, today).await;
    log_demand(&app, &bia, post, 5, today).await;

    let response = get_auth(app.clone(), "/api/v1/dashboard/summary", &ana).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(app, "/api/v1/me/dashboard?period=today", &ana).await).await;
    assert_eq!(json["data"]["totals"]["points"], 6);
    assert_eq!(json["data"]["designers"].as_array().unwrap().len(), 1);
}

/// An invalid custom range is a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_custom_period_validation(pool: SqlitePool) {
    create_user(&pool, "boss", "admin").await;
    let app = common::build_test_app(pool);
    let boss = token_for(&app, "boss").await;

    for uri in [
        "/api/v1/dashboard/summary?period=custom",
        "/api/v1/dashboard/summary?period=custom&start=2024-03-10&end=2024-03-01",
        "/api/v1/dashboard/summary?period=custom&start=2020-01-01&end=2024-01-01",
    ] {
        let response = get_auth(app.clone(), uri, &boss).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Daily series and art type breakdown
// ---------------------------------------------------------------------------

/// The daily series has one zero-filled entry per day.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_daily_series(pool: SqlitePool) {
    create_user(&pool, "ana", "designer").await;
    let post = create_art_type(&pool, "Post", 2).await;
    let app = common::build_test_app(pool);
    let ana = token_for(&app, "ana").await;
    let today = studio_today();
    let start = today - Duration::days(6);

    log_demand(&app, &ana, post, 3, today).await;
    log_demand(&app, &ana, post, 1, start).await;

    let uri = format!("/api/v1/dashboard/daily?period=custom&start={start}&end={today}");
    let json = body_json(get_auth(app, &uri, &ana).await).await;
    let days = json["data"]["days"].as_array().unwrap();

    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], start.to_string());
    assert_eq!(days[0]["points"], 2);
    assert_eq!(days[3]["points"], 0);
    assert_eq!(days[6]["points"], 6);
}

/// The art type breakdown is ordered by points.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_art_type_breakdown(pool: SqlitePool) {
    create_user(&pool, "ana", "designer").await;
    let post = create_art_type(&pool, "Post", 1).await;
    let video = create_art_type(&pool, "Video", 10).await;
    let app = common::build_test_app(pool);
    let ana = token_for(&app, "ana").await;
    let today = studio_today();

    log_demand(&app, &ana, post, 5, today).await;
    log_demand(&app, &ana, video, 1, today).await;

    let json = body_json(get_auth(app, "/api/v1/dashboard/art-types?period=today", &ana).await).await;
    let rows = json["data"]["art_types"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["art_type_name"], "Video");
    assert_eq!(rows[0]["points"], 10);
    assert_eq!(rows[1]["quantity"], 5);
}

// ---------------------------------------------------------------------------
// Work sessions
// ---------------------------------------------------------------------------

/// Clocking in twice on the same day returns the same session.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_clock_in_is_idempotent(pool: SqlitePool) {
    create_user(&pool, "ana", "designer").await;
    let app = common::build_test_app(pool);
    let ana = token_for(&app, "ana").await;

    let json = body_json(get_auth(app.clone(), "/api/v1/work-sessions/today", &ana).await).await;
    assert_eq!(json["data"]["clocked_in"], false);

    let first = post_auth(app.clone(), "/api/v1/work-sessions/clock-in", &ana).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;
    assert_eq!(first["data"]["created"], true);
    assert_eq!(first["data"]["session"]["work_date"], studio_today().to_string());

    let second = post_auth(app.clone(), "/api/v1/work-sessions/clock-in", &ana).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;
    assert_eq!(second["data"]["created"], false);
    assert_eq!(second["data"]["session"]["id"], first["data"]["session"]["id"]);

    let json = body_json(get_auth(app.clone(), "/api/v1/work-sessions/today", &ana).await).await;
    assert_eq!(json["data"]["clocked_in"], true);

    let json = body_json(get_auth(app, "/api/v1/work-sessions?period=today", &ana).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Admins cannot clock in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_cannot_clock_in(pool: SqlitePool) {
    create_user(&pool, "boss", "admin").await;
    let app = common::build_test_app(pool);
    let boss = token_for(&app, "boss").await;

    let response = post_auth(app, "/api/v1/work-sessions/clock-in", &boss).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
