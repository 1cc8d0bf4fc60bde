//! Repository for the `demands` and `demand_items` tables.
//!
//! A demand and its items are always written together inside a
//! transaction so the stored totals match the stored lines.

use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};
use studio_core::demand::compute_totals;
use studio_core::types::DbId;

use crate::models::demand::{Demand, DemandFilter, DemandItem, DemandWithItems, SaveDemand};
use crate::NOW;

/// Demand columns, qualified for the `demands d JOIN users u` shape.
const COLUMNS: &str = "d.id, d.designer_id, u.display_name AS designer_name, d.work_date, \
                       d.title, d.notes, d.total_quantity, d.total_points, d.is_active, \
                       d.created_by, d.created_at, d.updated_at";

const ITEM_COLUMNS: &str = "i.id, i.demand_id, i.art_type_id, a.name AS art_type_name, \
                            i.quantity, i.points_per_unit, i.line_points";

/// Provides operations for demands and their line items.
pub struct DemandRepo;

impl DemandRepo {
    /// Insert a demand with its items, returning the new demand ID.
    pub async fn create(pool: &SqlitePool, input: &SaveDemand) -> Result<DbId, sqlx::Error> {
        let totals = compute_totals(&input.items);
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO demands
                (designer_id, work_date, title, notes, total_quantity, total_points, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id",
        )
        .bind(input.designer_id)
        .bind(input.work_date)
        .bind(input.title.trim())
        .bind(&input.notes)
        .bind(totals.total_quantity)
        .bind(totals.total_points)
        .bind(input.created_by)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_items(&mut tx, id, input).await?;
        tx.commit().await?;
        Ok(id)
    }

    /// Replace an active demand's fields and items.
    ///
    /// Returns `false` if the demand does not exist or was deleted.
    pub async fn replace(
        pool: &SqlitePool,
        id: DbId,
        input: &SaveDemand,
    ) -> Result<bool, sqlx::Error> {
        let totals = compute_totals(&input.items);
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE demands SET
                designer_id = ?2,
                work_date = ?3,
                title = ?4,
                notes = ?5,
                total_quantity = ?6,
                total_points = ?7,
                updated_at = {NOW}
             WHERE id = ?1 AND is_active = TRUE"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(input.designer_id)
            .bind(input.work_date)
            .bind(input.title.trim())
            .bind(&input.notes)
            .bind(totals.total_quantity)
            .bind(totals.total_points)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM demand_items WHERE demand_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::insert_items(&mut tx, id, input).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn insert_items(
        tx: &mut Transaction<'_, Sqlite>,
        demand_id: DbId,
        input: &SaveDemand,
    ) -> Result<(), sqlx::Error> {
        for item in &input.items {
            sqlx::query(
                "INSERT INTO demand_items
                    (demand_id, art_type_id, quantity, points_per_unit, line_points)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(demand_id)
            .bind(item.art_type_id)
            .bind(item.quantity)
            .bind(item.points_per_unit)
            .bind(item.line_points())
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Find an active demand by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Demand>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM demands d JOIN users u ON u.id = d.designer_id
             WHERE d.id = ?1 AND d.is_active = TRUE"
        );
        sqlx::query_as::<_, Demand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active demand together with its items.
    pub async fn find_with_items(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<DemandWithItems>, sqlx::Error> {
        let Some(demand) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let items = Self::items_for(pool, id).await?;
        Ok(Some(DemandWithItems { demand, items }))
    }

    pub async fn items_for(
        pool: &SqlitePool,
        demand_id: DbId,
    ) -> Result<Vec<DemandItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM demand_items i JOIN art_types a ON a.id = i.art_type_id
             WHERE i.demand_id = ?1
             ORDER BY i.id"
        );
        sqlx::query_as::<_, DemandItem>(&query)
            .bind(demand_id)
            .fetch_all(pool)
            .await
    }

    /// Load items for many demands in one query, grouped by demand ID.
    pub async fn items_for_many(
        pool: &SqlitePool,
        demand_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<DemandItem>>, sqlx::Error> {
        let mut grouped: HashMap<DbId, Vec<DemandItem>> = HashMap::new();
        if demand_ids.is_empty() {
            return Ok(grouped);
        }
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM demand_items i JOIN art_types a ON a.id = i.art_type_id
             WHERE i.demand_id IN ({})
             ORDER BY i.id",
            super::placeholders(1, demand_ids.len())
        );
        let mut q = sqlx::query_as::<_, DemandItem>(&query);
        for id in demand_ids {
            q = q.bind(id);
        }
        for item in q.fetch_all(pool).await? {
            grouped.entry(item.demand_id).or_default().push(item);
        }
        Ok(grouped)
    }

    /// List active demands, newest work date first.
    pub async fn list(
        pool: &SqlitePool,
        filter: &DemandFilter,
    ) -> Result<Vec<DemandWithItems>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM demands d JOIN users u ON u.id = d.designer_id
             WHERE d.is_active = TRUE
               AND (?1 IS NULL OR d.designer_id = ?1)
               AND (?2 IS NULL OR d.work_date >= ?2)
               AND (?3 IS NULL OR d.work_date <= ?3)
             ORDER BY d.work_date DESC, d.id DESC
             LIMIT ?4 OFFSET ?5"
        );
        let demands = sqlx::query_as::<_, Demand>(&query)
            .bind(filter.designer_id)
            .bind(filter.start)
            .bind(filter.end)
            .bind(super::clamp_limit(filter.limit))
            .bind(super::clamp_offset(filter.offset))
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = demands.iter().map(|d| d.id).collect();
        let mut items = Self::items_for_many(pool, &ids).await?;
        Ok(demands
            .into_iter()
            .map(|demand| {
                let items = items.remove(&demand.id).unwrap_or_default();
                DemandWithItems { demand, items }
            })
            .collect())
    }

    /// Soft-delete a demand. Returns `true` if the row was deactivated.
    pub async fn soft_delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE demands SET is_active = FALSE, updated_at = {NOW}
             WHERE id = ?1 AND is_active = TRUE"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
