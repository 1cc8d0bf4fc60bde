//! Repository for the `art_types` table.

use sqlx::SqlitePool;
use studio_core::types::DbId;

use crate::models::art_type::{ArtType, CreateArtType, UpdateArtType};
use crate::NOW;

const COLUMNS: &str =
    "id, name, description, points, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for art types.
pub struct ArtTypeRepo;

impl ArtTypeRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateArtType) -> Result<ArtType, sqlx::Error> {
        let query = format!(
            "INSERT INTO art_types (name, description, points, sort_order)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtType>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.points)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<ArtType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM art_types WHERE id = ?1");
        sqlx::query_as::<_, ArtType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the given art types in one query. Missing IDs are simply absent.
    pub async fn find_many(pool: &SqlitePool, ids: &[DbId]) -> Result<Vec<ArtType>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM art_types WHERE id IN ({})",
            super::placeholders(1, ids.len())
        );
        let mut q = sqlx::query_as::<_, ArtType>(&query);
        for id in ids {
            q = q.bind(id);
        }
        q.fetch_all(pool).await
    }

    /// List art types by `sort_order`, then name.
    pub async fn list(
        pool: &SqlitePool,
        include_inactive: bool,
    ) -> Result<Vec<ArtType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM art_types
             WHERE (?1 OR is_active = TRUE)
             ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, ArtType>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Existing demand items keep the points they
    /// were saved with.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateArtType,
    ) -> Result<Option<ArtType>, sqlx::Error> {
        let query = format!(
            "UPDATE art_types SET
                name = COALESCE(?2, name),
                description = COALESCE(?3, description),
                points = COALESCE(?4, points),
                sort_order = COALESCE(?5, sort_order),
                is_active = COALESCE(?6, is_active),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtType>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.points)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an art type. Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE art_types SET is_active = FALSE, updated_at = {NOW}
             WHERE id = ?1 AND is_active = TRUE"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
