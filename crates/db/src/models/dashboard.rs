//! Aggregate rows produced by dashboard queries.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use studio_core::dashboard::{DailyPoint, DesignerTotals, Totals};
use studio_core::types::DbId;

/// Per-designer sums over a date range.
#[derive(Debug, Clone, FromRow)]
pub struct DesignerTotalsRow {
    pub designer_id: DbId,
    pub designer_name: String,
    pub points: i64,
    pub quantity: i64,
    pub demands: i64,
}

impl From<DesignerTotalsRow> for DesignerTotals {
    fn from(row: DesignerTotalsRow) -> Self {
        DesignerTotals {
            designer_id: row.designer_id,
            designer_name: row.designer_name,
            totals: Totals {
                points: row.points,
                quantity: row.quantity,
                demands: row.demands,
            },
        }
    }
}

/// Studio-wide sums over a date range.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct StudioTotalsRow {
    pub points: i64,
    pub quantity: i64,
    pub demands: i64,
}

impl From<StudioTotalsRow> for Totals {
    fn from(row: StudioTotalsRow) -> Self {
        Totals {
            points: row.points,
            quantity: row.quantity,
            demands: row.demands,
        }
    }
}

/// Per-day sums over a date range.
#[derive(Debug, Clone, FromRow)]
pub struct DailyTotalsRow {
    pub work_date: NaiveDate,
    pub points: i64,
    pub quantity: i64,
    pub demands: i64,
}

impl From<DailyTotalsRow> for DailyPoint {
    fn from(row: DailyTotalsRow) -> Self {
        DailyPoint {
            date: row.work_date,
            points: row.points,
            quantity: row.quantity,
            demands: row.demands,
        }
    }
}

/// Per-art-type sums over a date range.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtTypeTotalsRow {
    pub art_type_id: DbId,
    pub art_type_name: String,
    pub quantity: i64,
    pub points: i64,
}
