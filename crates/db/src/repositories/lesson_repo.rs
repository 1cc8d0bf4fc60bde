//! Repositories for the `lessons` and `lesson_progress` tables.

use chrono::Utc;
use sqlx::SqlitePool;
use studio_core::lessons::STATUS_COMPLETED;
use studio_core::roles::ROLE_DESIGNER;
use studio_core::types::DbId;

use crate::models::lesson::{CreateLesson, Lesson, LessonProgress, ProgressCount, UpdateLesson};
use crate::NOW;

const COLUMNS: &str = "id, title, description, url, sort_order, is_active, created_at, updated_at";

const PROGRESS_SELECT: &str = "SELECT p.id, p.lesson_id, l.title AS lesson_title, p.designer_id, \
                               p.status, p.completed_at, p.updated_at
                               FROM lesson_progress p JOIN lessons l ON l.id = p.lesson_id";

/// Provides CRUD operations for lessons.
pub struct LessonRepo;

impl LessonRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons (title, description, url, sort_order)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(&input.url)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE id = ?1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active lessons in display order.
    pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lessons WHERE is_active = TRUE ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Lesson>(&query).fetch_all(pool).await
    }

    pub async fn count_active(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE is_active = TRUE")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateLesson,
    ) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!(
            "UPDATE lessons SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                url = COALESCE(?4, url),
                sort_order = COALESCE(?5, sort_order),
                is_active = COALESCE(?6, is_active),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn deactivate(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE lessons SET is_active = FALSE, updated_at = {NOW}
             WHERE id = ?1 AND is_active = TRUE"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Tracks each designer's status on each lesson.
pub struct LessonProgressRepo;

impl LessonProgressRepo {
    /// Insert or update a designer's status on a lesson.
    ///
    /// `completed_at` is stamped on the first transition to completed and
    /// cleared when the lesson moves back to another status.
    pub async fn upsert(
        pool: &SqlitePool,
        lesson_id: DbId,
        designer_id: DbId,
        status: &str,
    ) -> Result<LessonProgress, sqlx::Error> {
        let now = Utc::now();
        let completed_at = (status == STATUS_COMPLETED).then_some(now);

        sqlx::query(
            "INSERT INTO lesson_progress (lesson_id, designer_id, status, completed_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (lesson_id, designer_id) DO UPDATE SET
                status = excluded.status,
                completed_at = CASE
                    WHEN excluded.status = ?6 THEN COALESCE(lesson_progress.completed_at, excluded.completed_at)
                    ELSE NULL
                END,
                updated_at = excluded.updated_at",
        )
        .bind(lesson_id)
        .bind(designer_id)
        .bind(status)
        .bind(completed_at)
        .bind(now)
        .bind(STATUS_COMPLETED)
        .execute(pool)
        .await?;

        let query = format!("{PROGRESS_SELECT} WHERE p.lesson_id = ?1 AND p.designer_id = ?2");
        sqlx::query_as::<_, LessonProgress>(&query)
            .bind(lesson_id)
            .bind(designer_id)
            .fetch_one(pool)
            .await
    }

    /// Progress rows for one designer on active lessons.
    pub async fn list_for_designer(
        pool: &SqlitePool,
        designer_id: DbId,
    ) -> Result<Vec<LessonProgress>, sqlx::Error> {
        let query = format!(
            "{PROGRESS_SELECT}
             WHERE p.designer_id = ?1 AND l.is_active = TRUE
             ORDER BY l.sort_order, l.id"
        );
        sqlx::query_as::<_, LessonProgress>(&query)
            .bind(designer_id)
            .fetch_all(pool)
            .await
    }

    /// Completed active lessons per active designer, including designers
    /// with none completed.
    pub async fn completed_counts(pool: &SqlitePool) -> Result<Vec<ProgressCount>, sqlx::Error> {
        sqlx::query_as::<_, ProgressCount>(
            "SELECT u.id AS designer_id,
                    u.display_name AS designer_name,
                    COUNT(l.id) AS completed
             FROM users u
             LEFT JOIN lesson_progress p
               ON p.designer_id = u.id AND p.status = ?1
             LEFT JOIN lessons l
               ON l.id = p.lesson_id AND l.is_active = TRUE
             WHERE u.role = ?2 AND u.is_active = TRUE
             GROUP BY u.id, u.display_name
             ORDER BY u.display_name",
        )
        .bind(STATUS_COMPLETED)
        .bind(ROLE_DESIGNER)
        .fetch_all(pool)
        .await
    }
}
