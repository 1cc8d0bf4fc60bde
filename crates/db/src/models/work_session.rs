//! Work session (daily clock-in) model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `work_sessions` table joined with the designer name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkSession {
    pub id: DbId,
    pub designer_id: DbId,
    pub designer_name: String,
    pub work_date: NaiveDate,
    pub clocked_in_at: Timestamp,
    pub created_at: Timestamp,
}
