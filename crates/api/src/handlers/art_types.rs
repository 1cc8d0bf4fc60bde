//! Handlers for the `/art-types` resource.
//!
//! Any authenticated user can list art types; changes require `admin`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studio_core::types::DbId;
use studio_db::models::art_type::{ArtType, CreateArtType, UpdateArtType};
use studio_db::repositories::ArtTypeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /art-types`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateArtTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Points must be at least 1"))]
    pub points: i64,
    pub sort_order: Option<i64>,
}

/// Request body for `PUT /art-types/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArtTypeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Points must be at least 1"))]
    pub points: Option<i64>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

fn ensure_name_not_blank(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name cannot be blank"));
    }
    Ok(())
}

/// GET /api/v1/art-types?include_inactive=
///
/// Designers only ever see active art types.
pub async fn list_art_types(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<ArtType>>>> {
    let include_inactive = params.include_inactive && user.is_admin();
    let art_types = ArtTypeRepo::list(&state.pool, include_inactive).await?;
    Ok(Json(DataResponse { data: art_types }))
}

/// POST /api/v1/art-types
pub async fn create_art_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateArtTypeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ArtType>>)> {
    input.validate()?;
    ensure_name_not_blank(&input.name)?;

    let art_type = ArtTypeRepo::create(
        &state.pool,
        &CreateArtType {
            name: input.name,
            description: input.description,
            points: input.points,
            sort_order: input.sort_order,
        },
    )
    .await?;
    tracing::info!(art_type_id = art_type.id, points = art_type.points, "Art type created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: art_type })))
}

/// PUT /api/v1/art-types/{id}
///
/// Point changes only affect demands saved afterwards.
pub async fn update_art_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArtTypeRequest>,
) -> AppResult<Json<DataResponse<ArtType>>> {
    input.validate()?;
    if let Some(name) = &input.name {
        ensure_name_not_blank(name)?;
    }

    let art_type = ArtTypeRepo::update(
        &state.pool,
        id,
        &UpdateArtType {
            name: input.name,
            description: input.description,
            points: input.points,
            sort_order: input.sort_order,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::not_found("ArtType", id))?;

    Ok(Json(DataResponse { data: art_type }))
}

/// DELETE /api/v1/art-types/{id}
///
/// Soft-deactivate. Existing demands keep referencing the art type.
pub async fn deactivate_art_type(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ArtTypeRepo::deactivate(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("ArtType", id))
    }
}
