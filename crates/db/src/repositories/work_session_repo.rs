//! Repository for the `work_sessions` table.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use studio_core::period::DateRange;
use studio_core::types::DbId;

use crate::models::work_session::WorkSession;

const COLUMNS: &str = "w.id, w.designer_id, u.display_name AS designer_name, w.work_date, \
                       w.clocked_in_at, w.created_at";

/// Provides clock-in operations.
pub struct WorkSessionRepo;

impl WorkSessionRepo {
    /// Clock a designer in for `work_date`.
    ///
    /// Idempotent: returns the existing session and `false` when the designer
    /// already clocked in that day.
    pub async fn clock_in(
        pool: &SqlitePool,
        designer_id: DbId,
        work_date: NaiveDate,
    ) -> Result<(WorkSession, bool), sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO work_sessions (designer_id, work_date) VALUES (?1, ?2)
             ON CONFLICT (designer_id, work_date) DO NOTHING",
        )
        .bind(designer_id)
        .bind(work_date)
        .execute(pool)
        .await?;
        let created = result.rows_affected() > 0;

        let session = Self::find_for_date(pool, designer_id, work_date)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((session, created))
    }

    pub async fn find_for_date(
        pool: &SqlitePool,
        designer_id: DbId,
        work_date: NaiveDate,
    ) -> Result<Option<WorkSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_sessions w JOIN users u ON u.id = w.designer_id
             WHERE w.designer_id = ?1 AND w.work_date = ?2"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(designer_id)
            .bind(work_date)
            .fetch_optional(pool)
            .await
    }

    /// List sessions in a range, newest first.
    pub async fn list(
        pool: &SqlitePool,
        range: &DateRange,
        designer_id: Option<DbId>,
    ) -> Result<Vec<WorkSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_sessions w JOIN users u ON u.id = w.designer_id
             WHERE w.work_date BETWEEN ?1 AND ?2
               AND (?3 IS NULL OR w.designer_id = ?3)
             ORDER BY w.work_date DESC, u.display_name"
        );
        sqlx::query_as::<_, WorkSession>(&query)
            .bind(range.start)
            .bind(range.end)
            .bind(designer_id)
            .fetch_all(pool)
            .await
    }
}
