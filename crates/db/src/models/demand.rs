//! Demand and demand line-item models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::demand::PricedItem;
use studio_core::types::{DbId, Timestamp};

/// A row from the `demands` table joined with the designer's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Demand {
    pub id: DbId,
    pub designer_id: DbId,
    pub designer_name: String,
    pub work_date: NaiveDate,
    pub title: String,
    pub notes: Option<String>,
    pub total_quantity: i64,
    pub total_points: i64,
    pub is_active: bool,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `demand_items` joined with its art type name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DemandItem {
    pub id: DbId,
    pub demand_id: DbId,
    pub art_type_id: DbId,
    pub art_type_name: String,
    pub quantity: i64,
    pub points_per_unit: i64,
    pub line_points: i64,
}

/// A demand with its line items, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct DemandWithItems {
    #[serde(flatten)]
    pub demand: Demand,
    pub items: Vec<DemandItem>,
}

/// DTO for inserting or replacing a demand. Items are already priced.
#[derive(Debug)]
pub struct SaveDemand {
    pub designer_id: DbId,
    pub work_date: NaiveDate,
    pub title: String,
    pub notes: Option<String>,
    pub items: Vec<PricedItem>,
    pub created_by: DbId,
}

/// Filters for demand history listing.
#[derive(Debug, Default, Deserialize)]
pub struct DemandFilter {
    pub designer_id: Option<DbId>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
