//! Useful-link and tag models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `useful_links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsefulLink {
    pub id: DbId,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A link with its tag names, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct LinkWithTags {
    #[serde(flatten)]
    pub link: UsefulLink,
    pub tags: Vec<String>,
}

/// A row from the `tags` table with its active-link count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagWithCount {
    pub id: DbId,
    pub name: String,
    pub link_count: i64,
}

/// `(link_id, tag name)` pairs used to attach tags to links in bulk.
#[derive(Debug, Clone, FromRow)]
pub struct LinkTagName {
    pub link_id: DbId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLink {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLink {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
