//! Repository for the `designer_notifications` table.

use chrono::Utc;
use sqlx::SqlitePool;
use studio_core::notification::is_visible;
use studio_core::types::DbId;

use crate::models::notification::{CreateNotification, DesignerNotification, UpdateNotification};
use crate::NOW;

const COLUMNS: &str = "id, designer_id, message, level, is_active, expires_at, dismissed_at, \
                       created_by, created_at, updated_at";

/// Provides operations for per-designer banner notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(
        pool: &SqlitePool,
        created_by: DbId,
        input: &CreateNotification,
    ) -> Result<DesignerNotification, sqlx::Error> {
        let query = format!(
            "INSERT INTO designer_notifications (designer_id, message, level, expires_at, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignerNotification>(&query)
            .bind(input.designer_id)
            .bind(input.message.trim())
            .bind(&input.level)
            .bind(input.expires_at)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<DesignerNotification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM designer_notifications WHERE id = ?1");
        sqlx::query_as::<_, DesignerNotification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing of all notifications, newest first.
    pub async fn list(
        pool: &SqlitePool,
        designer_id: Option<DbId>,
    ) -> Result<Vec<DesignerNotification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM designer_notifications
             WHERE (?1 IS NULL OR designer_id = ?1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, DesignerNotification>(&query)
            .bind(designer_id)
            .fetch_all(pool)
            .await
    }

    /// Banners the designer should currently see, newest first.
    ///
    /// Expiry is checked in Rust against the current time.
    pub async fn list_visible_for_designer(
        pool: &SqlitePool,
        designer_id: DbId,
    ) -> Result<Vec<DesignerNotification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM designer_notifications
             WHERE designer_id = ?1 AND is_active = TRUE AND dismissed_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, DesignerNotification>(&query)
            .bind(designer_id)
            .fetch_all(pool)
            .await?;
        let now = Utc::now();
        Ok(rows
            .into_iter()
            .filter(|n| is_visible(n.is_active, n.dismissed_at, n.expires_at, now))
            .collect())
    }

    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateNotification,
    ) -> Result<Option<DesignerNotification>, sqlx::Error> {
        let query = format!(
            "UPDATE designer_notifications SET
                message = COALESCE(?2, message),
                level = COALESCE(?3, level),
                is_active = COALESCE(?4, is_active),
                expires_at = COALESCE(?5, expires_at),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignerNotification>(&query)
            .bind(id)
            .bind(input.message.as_deref().map(str::trim))
            .bind(&input.level)
            .bind(input.is_active)
            .bind(input.expires_at)
            .fetch_optional(pool)
            .await
    }

    pub async fn deactivate(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE designer_notifications SET is_active = FALSE, updated_at = {NOW}
             WHERE id = ?1 AND is_active = TRUE"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Dismiss a notification on behalf of its recipient.
    ///
    /// Returns `false` if it does not exist or belongs to someone else.
    pub async fn dismiss(
        pool: &SqlitePool,
        id: DbId,
        designer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE designer_notifications
             SET dismissed_at = COALESCE(dismissed_at, ?3), updated_at = ?3
             WHERE id = ?1 AND designer_id = ?2",
        )
        .bind(id)
        .bind(designer_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
