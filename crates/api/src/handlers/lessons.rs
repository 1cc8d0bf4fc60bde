//! Handlers for the `/lessons` resource and per-designer lesson progress.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studio_core::lessons::{completion_pct, validate_description, validate_status};
use studio_core::links::validate_http_url;
use studio_core::types::DbId;
use studio_db::models::lesson::{
    CreateLesson, Lesson, LessonProgress, ProgressSummary, UpdateLesson,
};
use studio_db::repositories::{LessonProgressRepo, LessonRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireDesigner};
use crate::query::DesignerParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /lessons`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLessonRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub sort_order: Option<i64>,
}

/// Request body for `PUT /lessons/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLessonRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

/// Request body for `PUT /lessons/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub status: String,
}

fn check_lesson_fields(
    title: Option<&str>,
    description: Option<&str>,
    url: Option<&str>,
) -> AppResult<()> {
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::validation("Lesson title cannot be blank"));
    }
    validate_description(description).map_err(AppError::validation)?;
    if let Some(url) = url {
        validate_http_url(url).map_err(AppError::validation)?;
    }
    Ok(())
}

/// GET /api/v1/lessons
pub async fn list_lessons(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Lesson>>>> {
    let lessons = LessonRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: lessons }))
}

/// POST /api/v1/lessons
pub async fn create_lesson(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateLessonRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lesson>>)> {
    input.validate()?;
    check_lesson_fields(
        Some(&input.title),
        input.description.as_deref(),
        input.url.as_deref(),
    )?;

    let lesson = LessonRepo::create(
        &state.pool,
        &CreateLesson {
            title: input.title,
            description: input.description,
            url: input.url,
            sort_order: input.sort_order,
        },
    )
    .await?;
    tracing::info!(lesson_id = lesson.id, "Lesson created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: lesson })))
}

/// PUT /api/v1/lessons/{id}
pub async fn update_lesson(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLessonRequest>,
) -> AppResult<Json<DataResponse<Lesson>>> {
    input.validate()?;
    check_lesson_fields(
        input.title.as_deref(),
        input.description.as_deref(),
        input.url.as_deref(),
    )?;

    let lesson = LessonRepo::update(
        &state.pool,
        id,
        &UpdateLesson {
            title: input.title,
            description: input.description,
            url: input.url,
            sort_order: input.sort_order,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::not_found("Lesson", id))?;

    Ok(Json(DataResponse { data: lesson }))
}

/// DELETE /api/v1/lessons/{id}
pub async fn delete_lesson(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LessonRepo::deactivate(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Lesson", id))
    }
}

/// PUT /api/v1/lessons/{id}/progress
pub async fn set_progress(
    State(state): State<AppState>,
    RequireDesigner(user): RequireDesigner,
    Path(id): Path<DbId>,
    Json(input): Json<ProgressRequest>,
) -> AppResult<Json<DataResponse<LessonProgress>>> {
    validate_status(&input.status).map_err(AppError::validation)?;

    match LessonRepo::find_by_id(&state.pool, id).await? {
        Some(lesson) if lesson.is_active => {}
        _ => return Err(AppError::not_found("Lesson", id)),
    }

    let progress =
        LessonProgressRepo::upsert(&state.pool, id, user.user_id, &input.status).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// GET /api/v1/lessons/progress?designer_id=
///
/// Admins must name a designer; designers always get their own.
pub async fn list_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<DesignerParams>,
) -> AppResult<Json<DataResponse<Vec<LessonProgress>>>> {
    let designer_id = user
        .scoped_designer(params.designer_id)
        .ok_or_else(|| AppError::validation("designer_id is required"))?;

    let progress = LessonProgressRepo::list_for_designer(&state.pool, designer_id).await?;
    Ok(Json(DataResponse { data: progress }))
}

/// GET /api/v1/lessons/progress/summary
pub async fn progress_summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<ProgressSummary>>>> {
    let total_lessons = LessonRepo::count_active(&state.pool).await?;
    let summary = LessonProgressRepo::completed_counts(&state.pool)
        .await?
        .into_iter()
        .map(|row| ProgressSummary {
            designer_id: row.designer_id,
            designer_name: row.designer_name,
            completed: row.completed,
            total_lessons,
            completion_pct: completion_pct(row.completed, total_lessons),
        })
        .collect();
    Ok(Json(DataResponse { data: summary }))
}
