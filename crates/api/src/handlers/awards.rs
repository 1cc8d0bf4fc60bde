//! Handlers for awards, the monthly leaderboard and designer levels.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::awards::{
    level_for, rank, validate_award_description, validate_award_title, LevelInfo, RankedScore,
    Score,
};
use studio_core::period::parse_month;
use studio_core::types::DbId;
use studio_db::models::award::{Award, CreateAward};
use studio_db::repositories::{AwardRepo, DashboardRepo};

use super::require_active_designer;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::MonthParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::studio::StudioContext;

/// Query parameters for `GET /awards`.
#[derive(Debug, Deserialize)]
pub struct AwardListParams {
    pub month: Option<String>,
    pub designer_id: Option<DbId>,
}

/// One leaderboard row.
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub score: RankedScore,
    pub level: LevelInfo,
}

/// Response for `GET /awards/leaderboard`.
#[derive(Debug, Serialize)]
pub struct Leaderboard {
    pub month: String,
    pub entries: Vec<LeaderboardEntry>,
    pub awards: Vec<Award>,
}

/// GET /api/v1/awards?month=&designer_id=
pub async fn list_awards(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<AwardListParams>,
) -> AppResult<Json<DataResponse<Vec<Award>>>> {
    if let Some(month) = &params.month {
        parse_month(month).map_err(AppError::validation)?;
    }
    let awards = AwardRepo::list(&state.pool, params.month.as_deref(), params.designer_id).await?;
    Ok(Json(DataResponse { data: awards }))
}

/// POST /api/v1/awards
///
/// A designer can hold each title once per month; repeats are 409.
pub async fn create_award(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateAward>,
) -> AppResult<(StatusCode, Json<DataResponse<Award>>)> {
    parse_month(&input.month).map_err(AppError::validation)?;
    validate_award_title(&input.title).map_err(AppError::validation)?;
    validate_award_description(input.description.as_deref()).map_err(AppError::validation)?;
    require_active_designer(&state.pool, input.designer_id).await?;

    let award = AwardRepo::create(&state.pool, admin.user_id, &input).await?;
    tracing::info!(
        award_id = award.id,
        designer_id = award.designer_id,
        month = %award.month,
        "Award granted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: award })))
}

/// DELETE /api/v1/awards/{id}
pub async fn delete_award(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AwardRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Award", id))
    }
}

/// GET /api/v1/awards/leaderboard?month=
///
/// Defaults to the current studio month.
pub async fn leaderboard(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<MonthParams>,
) -> AppResult<Json<DataResponse<Leaderboard>>> {
    let month = match params.month {
        Some(month) => month,
        None => StudioContext::load(&state.pool).await?.current_month(),
    };
    let range = parse_month(&month).map_err(AppError::validation)?;

    let scores = DashboardRepo::designer_totals(&state.pool, &range, None)
        .await?
        .into_iter()
        .map(|row| Score {
            designer_id: row.designer_id,
            designer_name: row.designer_name,
            points: row.points,
            quantity: row.quantity,
        })
        .collect();

    let lifetime: HashMap<DbId, i64> = DashboardRepo::lifetime_points_by_designer(&state.pool)
        .await?
        .into_iter()
        .collect();

    let entries = rank(scores)
        .into_iter()
        .map(|score| LeaderboardEntry {
            level: level_for(lifetime.get(&score.designer_id).copied().unwrap_or(0)),
            score,
        })
        .collect();

    let awards = AwardRepo::list(&state.pool, Some(&month), None).await?;

    Ok(Json(DataResponse {
        data: Leaderboard {
            month,
            entries,
            awards,
        },
    }))
}

/// GET /api/v1/me/level
pub async fn my_level(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<LevelInfo>>> {
    let points = DashboardRepo::lifetime_points(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: level_for(points),
    }))
}
