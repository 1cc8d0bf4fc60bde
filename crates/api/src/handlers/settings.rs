//! Handlers for the singleton `/settings` resource.

use axum::extract::State;
use axum::Json;
use studio_core::settings::{validate_change, SettingsChange};
use studio_db::models::settings::{SystemSettings, UpdateSettings};
use studio_db::repositories::SettingsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<SystemSettings>>> {
    let settings = SettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings
///
/// Partial update. A shorter session timeout applies to existing sessions on
/// their next request.
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<UpdateSettings>,
) -> AppResult<Json<DataResponse<SystemSettings>>> {
    validate_change(&SettingsChange {
        studio_name: input.studio_name.as_deref(),
        timezone: input.timezone.as_deref(),
        week_start: input.week_start.as_deref(),
        session_timeout_minutes: input.session_timeout_minutes,
        daily_points_goal: input.daily_points_goal,
    })
    .map_err(AppError::validation)?;

    let settings = SettingsRepo::update(&state.pool, &input).await?;
    tracing::info!(
        user_id = admin.user_id,
        timezone = %settings.timezone,
        session_timeout_minutes = settings.session_timeout_minutes,
        "Settings updated"
    );
    Ok(Json(DataResponse { data: settings }))
}
