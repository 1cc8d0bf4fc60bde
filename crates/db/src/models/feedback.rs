//! Feedback model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `feedback` table with author and recipient names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub designer_id: DbId,
    pub designer_name: String,
    pub author_id: DbId,
    pub author_name: String,
    pub category: String,
    pub content: String,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateFeedback {
    pub designer_id: DbId,
    pub category: String,
    pub content: String,
}
