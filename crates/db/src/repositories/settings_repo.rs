//! Repository for the singleton `system_settings` row.

use sqlx::SqlitePool;

use crate::models::settings::{SystemSettings, UpdateSettings};
use crate::NOW;

const COLUMNS: &str =
    "studio_name, timezone, week_start, session_timeout_minutes, daily_points_goal, updated_at";

/// Reads and updates studio-wide settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Load the settings row. The migration seeds it, so it always exists.
    pub async fn get(pool: &SqlitePool) -> Result<SystemSettings, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_settings WHERE id = 1");
        sqlx::query_as::<_, SystemSettings>(&query)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Callers validate the values first.
    pub async fn update(
        pool: &SqlitePool,
        input: &UpdateSettings,
    ) -> Result<SystemSettings, sqlx::Error> {
        let query = format!(
            "UPDATE system_settings SET
                studio_name = COALESCE(?1, studio_name),
                timezone = COALESCE(?2, timezone),
                week_start = COALESCE(?3, week_start),
                session_timeout_minutes = COALESCE(?4, session_timeout_minutes),
                daily_points_goal = COALESCE(?5, daily_points_goal),
                updated_at = {NOW}
             WHERE id = 1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemSettings>(&query)
            .bind(input.studio_name.as_deref().map(str::trim))
            .bind(&input.timezone)
            .bind(&input.week_start)
            .bind(input.session_timeout_minutes)
            .bind(input.daily_points_goal)
            .fetch_one(pool)
            .await
    }
}
