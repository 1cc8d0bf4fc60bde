//! Handlers for useful links and their tags.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studio_core::links::{normalize_tag_name, normalize_tags, validate_http_url, validate_title};
use studio_core::types::DbId;
use studio_db::models::link::{CreateLink, LinkWithTags, TagWithCount, UpdateLink};
use studio_db::repositories::{LinkRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LinkListParams {
    pub tag: Option<String>,
}

/// Request body for `POST /links`.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PUT /links/{id}`. `tags`, when present, replaces the set.
#[derive(Debug, Deserialize)]
pub struct UpdateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// GET /api/v1/links?tag=
pub async fn list_links(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<LinkListParams>,
) -> AppResult<Json<DataResponse<Vec<LinkWithTags>>>> {
    let tag = params
        .tag
        .as_deref()
        .map(normalize_tag_name)
        .filter(|t| !t.is_empty());
    let links = LinkRepo::list(&state.pool, tag.as_deref()).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/links
pub async fn create_link(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateLinkRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LinkWithTags>>)> {
    validate_title(&input.title).map_err(AppError::validation)?;
    validate_http_url(&input.url).map_err(AppError::validation)?;
    let tags = normalize_tags(&input.tags).map_err(AppError::validation)?;

    let link = LinkRepo::create(
        &state.pool,
        admin.user_id,
        &CreateLink {
            title: input.title,
            url: input.url,
            description: input.description,
        },
        &tags,
    )
    .await?;
    tracing::info!(link_id = link.link.id, tags = link.tags.len(), "Link created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PUT /api/v1/links/{id}
pub async fn update_link(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLinkRequest>,
) -> AppResult<Json<DataResponse<LinkWithTags>>> {
    if let Some(title) = &input.title {
        validate_title(title).map_err(AppError::validation)?;
    }
    if let Some(url) = &input.url {
        validate_http_url(url).map_err(AppError::validation)?;
    }
    let tags = input
        .tags
        .as_deref()
        .map(normalize_tags)
        .transpose()
        .map_err(AppError::validation)?;

    let link = LinkRepo::update(
        &state.pool,
        id,
        &UpdateLink {
            title: input.title,
            url: input.url,
            description: input.description,
            is_active: input.is_active,
        },
        tags.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("Link", id))?;

    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/v1/links/{id}
pub async fn delete_link(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if LinkRepo::deactivate(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Link", id))
    }
}

/// GET /api/v1/tags
pub async fn list_tags(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TagWithCount>>>> {
    let tags = TagRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}
