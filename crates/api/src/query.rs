//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use serde::Deserialize;
use studio_core::period::PeriodKind;
use studio_core::types::DbId;

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Period selection shared by dashboards and history views
/// (`?period=&start=&end=&designer_id=`).
///
/// `start` and `end` are only read when `period=custom`.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub period: Option<PeriodKind>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub designer_id: Option<DbId>,
}

/// Optional designer filter (`?designer_id=`).
#[derive(Debug, Deserialize)]
pub struct DesignerParams {
    pub designer_id: Option<DbId>,
}

/// Month selection (`?month=YYYY-MM`).
#[derive(Debug, Deserialize)]
pub struct MonthParams {
    pub month: Option<String>,
}
