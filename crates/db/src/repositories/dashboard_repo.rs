//! Aggregate queries backing the dashboards and leaderboard.
//!
//! All sums only count active demands. Designer rows come from a
//! `LEFT JOIN` so designers with no work in the range still appear.
//! Studio totals read `demands` alone, so work by since-deactivated
//! designers keeps counting.

use sqlx::SqlitePool;
use studio_core::period::DateRange;
use studio_core::roles::ROLE_DESIGNER;
use studio_core::types::DbId;

use crate::models::dashboard::{
    ArtTypeTotalsRow, DailyTotalsRow, DesignerTotalsRow, StudioTotalsRow,
};

/// Read-only aggregation queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Per-designer totals for every active designer (or just one).
    pub async fn designer_totals(
        pool: &SqlitePool,
        range: &DateRange,
        designer_id: Option<DbId>,
    ) -> Result<Vec<DesignerTotalsRow>, sqlx::Error> {
        sqlx::query_as::<_, DesignerTotalsRow>(
            "SELECT u.id AS designer_id,
                    u.display_name AS designer_name,
                    COALESCE(SUM(d.total_points), 0) AS points,
                    COALESCE(SUM(d.total_quantity), 0) AS quantity,
                    COUNT(d.id) AS demands
             FROM users u
             LEFT JOIN demands d
               ON d.designer_id = u.id
              AND d.is_active = TRUE
              AND d.work_date BETWEEN ?1 AND ?2
             WHERE u.role = ?3 AND u.is_active = TRUE
               AND (?4 IS NULL OR u.id = ?4)
             GROUP BY u.id, u.display_name
             ORDER BY u.display_name",
        )
        .bind(range.start)
        .bind(range.end)
        .bind(ROLE_DESIGNER)
        .bind(designer_id)
        .fetch_all(pool)
        .await
    }

    /// Totals over every active demand in the range (or one designer's).
    pub async fn studio_totals(
        pool: &SqlitePool,
        range: &DateRange,
        designer_id: Option<DbId>,
    ) -> Result<StudioTotalsRow, sqlx::Error> {
        sqlx::query_as::<_, StudioTotalsRow>(
            "SELECT COALESCE(SUM(d.total_points), 0) AS points,
                    COALESCE(SUM(d.total_quantity), 0) AS quantity,
                    COUNT(d.id) AS demands
             FROM demands d
             WHERE d.is_active = TRUE
               AND d.work_date BETWEEN ?1 AND ?2
               AND (?3 IS NULL OR d.designer_id = ?3)",
        )
        .bind(range.start)
        .bind(range.end)
        .bind(designer_id)
        .fetch_one(pool)
        .await
    }

    /// Per-day totals; days without demands are absent.
    pub async fn daily_totals(
        pool: &SqlitePool,
        range: &DateRange,
        designer_id: Option<DbId>,
    ) -> Result<Vec<DailyTotalsRow>, sqlx::Error> {
        sqlx::query_as::<_, DailyTotalsRow>(
            "SELECT d.work_date AS work_date,
                    COALESCE(SUM(d.total_points), 0) AS points,
                    COALESCE(SUM(d.total_quantity), 0) AS quantity,
                    COUNT(d.id) AS demands
             FROM demands d
             WHERE d.is_active = TRUE
               AND d.work_date BETWEEN ?1 AND ?2
               AND (?3 IS NULL OR d.designer_id = ?3)
             GROUP BY d.work_date
             ORDER BY d.work_date",
        )
        .bind(range.start)
        .bind(range.end)
        .bind(designer_id)
        .fetch_all(pool)
        .await
    }

    /// Per-art-type totals, highest points first.
    pub async fn art_type_totals(
        pool: &SqlitePool,
        range: &DateRange,
        designer_id: Option<DbId>,
    ) -> Result<Vec<ArtTypeTotalsRow>, sqlx::Error> {
        sqlx::query_as::<_, ArtTypeTotalsRow>(
            "SELECT a.id AS art_type_id,
                    a.name AS art_type_name,
                    COALESCE(SUM(i.quantity), 0) AS quantity,
                    COALESCE(SUM(i.line_points), 0) AS points
             FROM demand_items i
             JOIN demands d ON d.id = i.demand_id
             JOIN art_types a ON a.id = i.art_type_id
             WHERE d.is_active = TRUE
               AND d.work_date BETWEEN ?1 AND ?2
               AND (?3 IS NULL OR d.designer_id = ?3)
             GROUP BY a.id, a.name
             ORDER BY points DESC, a.name",
        )
        .bind(range.start)
        .bind(range.end)
        .bind(designer_id)
        .fetch_all(pool)
        .await
    }

    /// All points a designer has ever logged on active demands.
    pub async fn lifetime_points(pool: &SqlitePool, designer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_points), 0) FROM demands
             WHERE designer_id = ?1 AND is_active = TRUE",
        )
        .bind(designer_id)
        .fetch_one(pool)
        .await
    }

    /// Lifetime points for every designer that has logged anything.
    pub async fn lifetime_points_by_designer(
        pool: &SqlitePool,
    ) -> Result<Vec<(DbId, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, i64)>(
            "SELECT designer_id, COALESCE(SUM(total_points), 0) FROM demands
             WHERE is_active = TRUE
             GROUP BY designer_id",
        )
        .fetch_all(pool)
        .await
    }
}
