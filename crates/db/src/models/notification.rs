//! Designer banner notification model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `designer_notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignerNotification {
    pub id: DbId,
    pub designer_id: DbId,
    pub message: String,
    pub level: String,
    pub is_active: bool,
    pub expires_at: Option<Timestamp>,
    pub dismissed_at: Option<Timestamp>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateNotification {
    pub designer_id: DbId,
    pub message: String,
    pub level: String,
    pub expires_at: Option<Timestamp>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNotification {
    pub message: Option<String>,
    pub level: Option<String>,
    pub is_active: Option<bool>,
    pub expires_at: Option<Timestamp>,
}
