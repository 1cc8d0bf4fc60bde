//! Singleton system settings model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::Timestamp;

/// The single row of the `system_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemSettings {
    pub studio_name: String,
    pub timezone: String,
    pub week_start: String,
    pub session_timeout_minutes: i64,
    pub daily_points_goal: i64,
    pub updated_at: Timestamp,
}

/// Partial settings update. `None` fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSettings {
    pub studio_name: Option<String>,
    pub timezone: Option<String>,
    pub week_start: Option<String>,
    pub session_timeout_minutes: Option<i64>,
    pub daily_points_goal: Option<i64>,
}
