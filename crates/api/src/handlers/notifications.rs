//! Handlers for per-designer banner notifications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use studio_core::notification::{validate_level, validate_message};
use studio_core::types::{DbId, Timestamp};
use studio_db::models::notification::{
    CreateNotification, DesignerNotification, UpdateNotification,
};
use studio_db::repositories::NotificationRepo;

use super::require_active_designer;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::DesignerParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn ensure_future(expires_at: Option<Timestamp>) -> AppResult<()> {
    match expires_at {
        Some(at) if at <= Utc::now() => Err(AppError::validation(
            "expires_at must be in the future",
        )),
        _ => Ok(()),
    }
}

/// POST /api/v1/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<DesignerNotification>>)> {
    validate_level(&input.level).map_err(AppError::validation)?;
    validate_message(&input.message).map_err(AppError::validation)?;
    ensure_future(input.expires_at)?;
    require_active_designer(&state.pool, input.designer_id).await?;

    let notification = NotificationRepo::create(&state.pool, admin.user_id, &input).await?;
    tracing::info!(
        notification_id = notification.id,
        designer_id = notification.designer_id,
        level = %notification.level,
        "Notification created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: notification })))
}

/// GET /api/v1/notifications?designer_id=
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<DesignerParams>,
) -> AppResult<Json<DataResponse<Vec<DesignerNotification>>>> {
    let notifications = NotificationRepo::list(&state.pool, params.designer_id).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// PUT /api/v1/notifications/{id}
pub async fn update_notification(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNotification>,
) -> AppResult<Json<DataResponse<DesignerNotification>>> {
    if let Some(level) = &input.level {
        validate_level(level).map_err(AppError::validation)?;
    }
    if let Some(message) = &input.message {
        validate_message(message).map_err(AppError::validation)?;
    }
    ensure_future(input.expires_at)?;

    let notification = NotificationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Notification", id))?;
    Ok(Json(DataResponse {
        data: notification,
    }))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NotificationRepo::deactivate(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Notification", id))
    }
}

/// GET /api/v1/me/notifications
pub async fn my_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DesignerNotification>>>> {
    let notifications =
        NotificationRepo::list_visible_for_designer(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications/{id}/dismiss
///
/// Only the recipient can dismiss; others get 404.
pub async fn dismiss_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NotificationRepo::dismiss(&state.pool, id, user.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Notification", id))
    }
}
