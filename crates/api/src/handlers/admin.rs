//! Handlers for the `/admin` resource (user management) and `/designers`.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studio_core::roles::validate_role;
use studio_core::types::DbId;
use studio_db::models::user::{CreateUser, DesignerOption, UpdateUser, UserResponse};
use studio_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    pub password: String,
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: Option<String>,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a new user. Validates input, hashes the password, and returns
/// a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    validate_role(&input.role).map_err(AppError::validation)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username.trim().to_string(),
        display_name: input.display_name.trim().to_string(),
        email: input.email,
        password_hash: hashed,
        role: input.role,
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(
        user_id = user.id,
        role = %user.role,
        created_by = admin.user_id,
        "User created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update a user's profile fields (not password).
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    if let Some(role) = &input.role {
        validate_role(role).map_err(AppError::validation)?;
    }
    if id == admin.user_id && input.is_active == Some(false) {
        return Err(AppError::validation("You cannot deactivate your own account"));
    }
    if id == admin.user_id && input.role.as_deref().is_some_and(|r| r != admin.role) {
        return Err(AppError::validation("You cannot change your own role"));
    }

    let previous = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;

    let update_dto = UpdateUser {
        username: input.username.map(|u| u.trim().to_string()),
        display_name: input.display_name.map(|d| d.trim().to_string()),
        email: input.email,
        role: input.role,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::not_found("User", id))?;

    if !user.is_active || user.role != previous.role {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(
            user_id = id,
            role = %user.role,
            is_active = user.is_active,
            updated_by = admin.user_id,
            "User sessions revoked after account change"
        );
    }

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate a user and end their sessions. Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::validation("You cannot deactivate your own account"));
    }

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::not_found("User", id));
    }

    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    tracing::info!(user_id = id, deactivated_by = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Admin-initiated password reset. Clears any lockout and ends the user's sessions.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &hashed).await?;
    if !updated {
        return Err(AppError::not_found("User", id));
    }

    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    tracing::info!(user_id = id, reset_by = admin.user_id, "Password reset");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/designers
///
/// Active designers, for filter dropdowns.
pub async fn list_designers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<DesignerOption>>>> {
    let designers = UserRepo::list_designers(&state.pool).await?;
    Ok(Json(DataResponse { data: designers }))
}
