//! Lesson and lesson-progress models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

/// A row from the `lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateLesson {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLesson {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

/// A row from `lesson_progress` joined with the lesson title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonProgress {
    pub id: DbId,
    pub lesson_id: DbId,
    pub lesson_title: String,
    pub designer_id: DbId,
    pub status: String,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// Grouped completion counts per designer.
#[derive(Debug, Clone, FromRow)]
pub struct ProgressCount {
    pub designer_id: DbId,
    pub designer_name: String,
    pub completed: i64,
}

/// Completion summary row returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub designer_id: DbId,
    pub designer_name: String,
    pub completed: i64,
    pub total_lessons: i64,
    pub completion_pct: f64,
}
