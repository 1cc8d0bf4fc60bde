//! Repository for the `feedback` table.

use chrono::Utc;
use sqlx::SqlitePool;
use studio_core::types::DbId;

use crate::models::feedback::{CreateFeedback, Feedback};

const SELECT: &str = "SELECT f.id, f.designer_id, d.display_name AS designer_name, \
                      f.author_id, a.display_name AS author_name, f.category, f.content, \
                      f.read_at, f.created_at, f.updated_at
                      FROM feedback f
                      JOIN users d ON d.id = f.designer_id
                      JOIN users a ON a.id = f.author_id";

/// Provides operations for admin-to-designer feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    pub async fn create(
        pool: &SqlitePool,
        author_id: DbId,
        input: &CreateFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO feedback (designer_id, author_id, category, content)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )
        .bind(input.designer_id)
        .bind(author_id)
        .bind(&input.category)
        .bind(input.content.trim())
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("{SELECT} WHERE f.id = ?1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List feedback, newest first.
    pub async fn list(
        pool: &SqlitePool,
        designer_id: Option<DbId>,
        unread_only: bool,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE (?1 IS NULL OR f.designer_id = ?1)
               AND (?2 = FALSE OR f.read_at IS NULL)
             ORDER BY f.created_at DESC, f.id DESC"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(designer_id)
            .bind(unread_only)
            .fetch_all(pool)
            .await
    }

    pub async fn unread_count(pool: &SqlitePool, designer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM feedback WHERE designer_id = ?1 AND read_at IS NULL",
        )
        .bind(designer_id)
        .fetch_one(pool)
        .await
    }

    /// Mark feedback read by its recipient. Already-read feedback keeps its
    /// original `read_at`.
    ///
    /// Returns `false` if the feedback does not exist or belongs to someone else.
    pub async fn mark_read(
        pool: &SqlitePool,
        id: DbId,
        designer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE feedback SET read_at = COALESCE(read_at, ?3), updated_at = ?3
             WHERE id = ?1 AND designer_id = ?2",
        )
        .bind(id)
        .bind(designer_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
