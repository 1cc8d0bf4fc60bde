//! Handlers for the `/feedback` resource.
//!
//! Admins write feedback to designers; designers read their own and mark it read.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::feedback::{validate_category, validate_content};
use studio_core::types::DbId;
use studio_db::models::feedback::{CreateFeedback, Feedback};
use studio_db::repositories::FeedbackRepo;

use super::require_active_designer;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /feedback`.
#[derive(Debug, Deserialize)]
pub struct FeedbackListParams {
    pub designer_id: Option<DbId>,
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// POST /api/v1/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateFeedback>,
) -> AppResult<(StatusCode, Json<DataResponse<Feedback>>)> {
    validate_category(&input.category).map_err(AppError::validation)?;
    validate_content(&input.content).map_err(AppError::validation)?;
    require_active_designer(&state.pool, input.designer_id).await?;

    let feedback = FeedbackRepo::create(&state.pool, admin.user_id, &input).await?;
    tracing::info!(
        feedback_id = feedback.id,
        designer_id = feedback.designer_id,
        category = %feedback.category,
        "Feedback sent"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// GET /api/v1/feedback?designer_id=&unread_only=
///
/// Designers always get their own feedback.
pub async fn list_feedback(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<FeedbackListParams>,
) -> AppResult<Json<DataResponse<Vec<Feedback>>>> {
    let items = FeedbackRepo::list(
        &state.pool,
        user.scoped_designer(params.designer_id),
        params.unread_only,
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/feedback/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let unread = FeedbackRepo::unread_count(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread },
    }))
}

/// POST /api/v1/feedback/{id}/read
///
/// Only the recipient can mark feedback read; others get 404.
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FeedbackRepo::mark_read(&state.pool, id, user.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Feedback", id))
    }
}

/// DELETE /api/v1/feedback/{id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FeedbackRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Feedback", id))
    }
}
