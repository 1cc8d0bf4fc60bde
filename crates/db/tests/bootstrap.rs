use sqlx::SqlitePool;

/// Full bootstrap test: migrate, health check, verify schema and seed data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: SqlitePool) {
    studio_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "user_sessions",
        "art_types",
        "demands",
        "demand_items",
        "work_sessions",
        "feedback",
        "lessons",
        "lesson_progress",
        "awards",
        "useful_links",
        "tags",
        "link_tags",
        "system_settings",
        "designer_notifications",
    ];

    for table in tables {
        let exists: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} lookup failed: {e}"));
        assert_eq!(exists.0, 1, "{table} should exist");
    }
}

/// The settings row is seeded with the studio defaults.
#[sqlx::test(migrations = "./migrations")]
async fn test_settings_seeded(pool: SqlitePool) {
    let settings = studio_db::repositories::SettingsRepo::get(&pool)
        .await
        .unwrap();
    assert_eq!(settings.timezone, "America/Sao_Paulo");
    assert_eq!(settings.week_start, "monday");
    assert_eq!(settings.session_timeout_minutes, 60);
    assert_eq!(settings.daily_points_goal, 10);
}

/// Only one settings row may exist.
#[sqlx::test(migrations = "./migrations")]
async fn test_settings_singleton_enforced(pool: SqlitePool) {
    let result = sqlx::query(
        "INSERT INTO system_settings
            (id, studio_name, timezone, week_start, session_timeout_minutes, daily_points_goal)
         VALUES (2, 'Other', 'UTC', 'monday', 60, 10)",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
