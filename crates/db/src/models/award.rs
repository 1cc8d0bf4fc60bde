//! Award model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `awards` table with the designer name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Award {
    pub id: DbId,
    pub designer_id: DbId,
    pub designer_name: String,
    pub month: String,
    pub title: String,
    pub description: Option<String>,
    pub awarded_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAward {
    pub designer_id: DbId,
    pub month: String,
    pub title: String,
    pub description: Option<String>,
}
