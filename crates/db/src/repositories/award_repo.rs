//! Repository for the `awards` table.

use sqlx::SqlitePool;
use studio_core::types::DbId;

use crate::models::award::{Award, CreateAward};

const SELECT: &str = "SELECT a.id, a.designer_id, u.display_name AS designer_name, a.month, \
                      a.title, a.description, a.awarded_by, a.created_at, a.updated_at
                      FROM awards a JOIN users u ON u.id = a.designer_id";

/// Provides operations for monthly awards.
pub struct AwardRepo;

impl AwardRepo {
    pub async fn create(
        pool: &SqlitePool,
        awarded_by: DbId,
        input: &CreateAward,
    ) -> Result<Award, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO awards (designer_id, month, title, description, awarded_by)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id",
        )
        .bind(input.designer_id)
        .bind(&input.month)
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(awarded_by)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Award>, sqlx::Error> {
        let query = format!("{SELECT} WHERE a.id = ?1");
        sqlx::query_as::<_, Award>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List awards, newest month first.
    pub async fn list(
        pool: &SqlitePool,
        month: Option<&str>,
        designer_id: Option<DbId>,
    ) -> Result<Vec<Award>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE (?1 IS NULL OR a.month = ?1)
               AND (?2 IS NULL OR a.designer_id = ?2)
             ORDER BY a.month DESC, a.created_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, Award>(&query)
            .bind(month)
            .bind(designer_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM awards WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
