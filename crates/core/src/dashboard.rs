//! Dashboard aggregation: totals, comparisons, averages, and daily series.
//!
//! The database returns grouped sums; this module turns them into the
//! figures shown on the admin and designer dashboards.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::period::DateRange;
use crate::types::DbId;

/// Points, quantity, and demand count for some slice of work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub points: i64,
    pub quantity: i64,
    pub demands: i64,
}

impl Totals {
    pub fn add(self, other: Totals) -> Totals {
        Totals {
            points: self.points + other.points,
            quantity: self.quantity + other.quantity,
            demands: self.demands + other.demands,
        }
    }
}

/// Grouped totals for one designer over a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignerTotals {
    pub designer_id: DbId,
    pub designer_name: String,
    pub totals: Totals,
}

/// A designer's row on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignerSummary {
    pub designer_id: DbId,
    pub designer_name: String,
    pub points: i64,
    pub quantity: i64,
    pub demands: i64,
    /// `None` when no business day of the range has elapsed yet.
    pub avg_points_per_business_day: Option<f64>,
    /// Points expected so far: daily goal times elapsed business days.
    pub goal_points: i64,
    /// `None` when the expected points are zero.
    pub goal_progress_pct: Option<f64>,
}

/// One day of the zero-filled daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub points: i64,
    pub quantity: i64,
    pub demands: i64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Relative change from `previous` to `current`, in percent.
///
/// Returns `None` when there is no baseline to compare against.
pub fn percent_change(current: i64, previous: i64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    Some(round2(
        (current - previous) as f64 / previous as f64 * 100.0,
    ))
}

/// Average points per business day, or `None` for zero days.
pub fn average_per_day(points: i64, business_days: i64) -> Option<f64> {
    if business_days <= 0 {
        return None;
    }
    Some(round2(points as f64 / business_days as f64))
}

/// Percentage of `goal` reached by `points`, uncapped.
pub fn goal_progress(points: i64, goal: i64) -> Option<f64> {
    if goal <= 0 {
        return None;
    }
    Some(round2(points as f64 / goal as f64 * 100.0))
}

/// Build dashboard rows, highest points first (ties broken by name).
pub fn summarize_designers(
    rows: &[DesignerTotals],
    elapsed_business_days: i64,
    daily_points_goal: i64,
) -> Vec<DesignerSummary> {
    let goal_points = daily_points_goal * elapsed_business_days.max(0);

    let mut summaries: Vec<DesignerSummary> = rows
        .iter()
        .map(|row| DesignerSummary {
            designer_id: row.designer_id,
            designer_name: row.designer_name.clone(),
            points: row.totals.points,
            quantity: row.totals.quantity,
            demands: row.totals.demands,
            avg_points_per_business_day: average_per_day(
                row.totals.points,
                elapsed_business_days,
            ),
            goal_points,
            goal_progress_pct: goal_progress(row.totals.points, goal_points),
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.designer_name.cmp(&b.designer_name))
    });
    summaries
}

/// Expand sparse per-day rows into one entry per day of `range`.
///
/// Rows outside the range are ignored; rows sharing a date are merged.
pub fn fill_daily_series(range: &DateRange, rows: &[DailyPoint]) -> Vec<DailyPoint> {
    let mut by_date: HashMap<NaiveDate, Totals> = HashMap::new();
    for row in rows.iter().filter(|r| range.contains(r.date)) {
        let entry = by_date.entry(row.date).or_default();
        *entry = entry.add(Totals {
            points: row.points,
            quantity: row.quantity,
            demands: row.demands,
        });
    }

    range
        .days()
        .map(|date| {
            let totals = by_date.get(&date).copied().unwrap_or_default();
            DailyPoint {
                date,
                points: totals.points,
                quantity: totals.quantity,
                demands: totals.demands,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(id: DbId, name: &str, points: i64, quantity: i64, demands: i64) -> DesignerTotals {
        DesignerTotals {
            designer_id: id,
            designer_name: name.to_string(),
            totals: Totals {
                points,
                quantity,
                demands,
            },
        }
    }

    #[test]
    fn percent_change_without_baseline_is_none() {
        assert_eq!(percent_change(10, 0), None);
        assert_eq!(percent_change(0, 0), None);
    }

    #[test]
    fn percent_change_rounds_to_two_places() {
        assert_eq!(percent_change(150, 100), Some(50.0));
        assert_eq!(percent_change(50, 100), Some(-50.0));
        assert_eq!(percent_change(2, 3), Some(-33.33));
    }

    #[test]
    fn average_requires_business_days() {
        assert_eq!(average_per_day(40, 0), None);
        assert_eq!(average_per_day(40, 8), Some(5.0));
        assert_eq!(average_per_day(10, 3), Some(3.33));
    }

    #[test]
    fn summaries_sorted_and_goal_applied() {
        let rows = [
            row(1, "bruna", 30, 10, 3),
            row(2, "ana", 50, 12, 4),
            row(3, "carla", 30, 9, 2),
        ];
        let out = summarize_designers(&rows, 5, 10);

        let names: Vec<_> = out.iter().map(|s| s.designer_name.as_str()).collect();
        assert_eq!(names, ["ana", "bruna", "carla"]);

        assert_eq!(out[0].goal_points, 50);
        assert_eq!(out[0].goal_progress_pct, Some(100.0));
        assert_eq!(out[1].goal_progress_pct, Some(60.0));
        assert_eq!(out[0].avg_points_per_business_day, Some(10.0));
    }

    #[test]
    fn summaries_without_elapsed_days_have_no_ratios() {
        let out = summarize_designers(&[row(1, "ana", 12, 3, 1)], 0, 10);
        assert_eq!(out[0].goal_points, 0);
        assert_eq!(out[0].goal_progress_pct, None);
        assert_eq!(out[0].avg_points_per_business_day, None);
    }

    #[test]
    fn totals_add_fieldwise() {
        let a = Totals {
            points: 3,
            quantity: 2,
            demands: 1,
        };
        let b = Totals {
            points: 7,
            quantity: 5,
            demands: 2,
        };
        assert_eq!(
            a.add(b),
            Totals {
                points: 10,
                quantity: 7,
                demands: 3
            }
        );
    }

    #[test]
    fn daily_series_zero_fills_and_ignores_outside_rows() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 4)).unwrap();
        let rows = [
            DailyPoint {
                date: d(2024, 1, 2),
                points: 5,
                quantity: 2,
                demands: 1,
            },
            DailyPoint {
                date: d(2024, 1, 2),
                points: 1,
                quantity: 1,
                demands: 1,
            },
            DailyPoint {
                date: d(2024, 2, 1),
                points: 99,
                quantity: 9,
                demands: 9,
            },
        ];
        let series = fill_daily_series(&range, &rows);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].points, 0);
        assert_eq!(series[1].points, 6);
        assert_eq!(series[1].demands, 2);
        assert_eq!(series[3].date, d(2024, 1, 4));
        assert_eq!(series.iter().map(|p| p.points).sum::<i64>(), 6);
    }
}
