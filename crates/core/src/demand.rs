//! Demand line-item validation and point totals.
//!
//! A demand is a piece of logged work made of one or more line items. Each
//! line references an art type and a quantity; its points are the quantity
//! times the art type's point value at the moment the demand is saved.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::DbId;

/// Maximum quantity accepted on a single line item.
pub const MAX_ITEM_QUANTITY: i64 = 1_000;

/// Maximum number of line items on one demand.
pub const MAX_ITEMS_PER_DEMAND: usize = 100;

/// Maximum length of a demand title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of free-form demand notes.
pub const MAX_NOTES_LENGTH: usize = 2_000;

/// A line item after its art type has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedItem {
    pub art_type_id: DbId,
    pub quantity: i64,
    pub points_per_unit: i64,
}

impl PricedItem {
    pub fn line_points(&self) -> i64 {
        self.quantity * self.points_per_unit
    }
}

/// Aggregated totals stored on the demand row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DemandTotals {
    pub total_quantity: i64,
    pub total_points: i64,
}

/// Sum quantities and line points across all items.
pub fn compute_totals(items: &[PricedItem]) -> DemandTotals {
    items.iter().fold(DemandTotals::default(), |acc, item| DemandTotals {
        total_quantity: acc.total_quantity + item.quantity,
        total_points: acc.total_points + item.line_points(),
    })
}

/// Validate the raw `(art_type_id, quantity)` pairs submitted by a client.
pub fn validate_items(items: &[(DbId, i64)]) -> Result<(), String> {
    if items.is_empty() {
        return Err("A demand must contain at least one item".to_string());
    }
    if items.len() > MAX_ITEMS_PER_DEMAND {
        return Err(format!(
            "A demand cannot contain more than {MAX_ITEMS_PER_DEMAND} items"
        ));
    }
    for (art_type_id, quantity) in items {
        if *quantity < 1 || *quantity > MAX_ITEM_QUANTITY {
            return Err(format!(
                "Quantity for art type {art_type_id} must be between 1 and {MAX_ITEM_QUANTITY}"
            ));
        }
    }
    Ok(())
}

/// Validate the demand title: non-blank and within the length limit.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Demand title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Demand title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_notes(notes: Option<&str>) -> Result<(), String> {
    match notes {
        Some(n) if n.chars().count() > MAX_NOTES_LENGTH => Err(format!(
            "Demand notes exceed maximum length of {MAX_NOTES_LENGTH} characters"
        )),
        _ => Ok(()),
    }
}

/// Work cannot be logged for a date after the studio's local today.
pub fn validate_work_date(work_date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if work_date > today {
        return Err(format!(
            "Work date {work_date} is in the future (today is {today})"
        ));
    }
    Ok(())
}
