//! Art type model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `art_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtType {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub points: i64,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateArtType {
    pub name: String,
    pub description: Option<String>,
    pub points: i64,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateArtType {
    pub name: Option<String>,
    pub description: Option<String>,
    pub points: Option<i64>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}
