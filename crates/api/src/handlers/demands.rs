//! Handlers for the `/demands` resource.
//!
//! Designers log demands for themselves; admins may log or edit on behalf of
//! any active designer. Points per unit are copied from the art type when the
//! demand is saved, so later art type edits never rewrite history.

use std::collections::{BTreeSet, HashMap};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use studio_core::demand::{
    validate_items, validate_notes, validate_title, validate_work_date, PricedItem,
};
use studio_core::period::PeriodKind;
use studio_core::types::DbId;
use studio_db::models::demand::{Demand, DemandFilter, DemandWithItems, SaveDemand};
use studio_db::repositories::{ArtTypeRepo, DemandRepo};

use super::require_active_designer;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PeriodParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::studio::StudioContext;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DemandItemInput {
    pub art_type_id: DbId,
    pub quantity: i64,
}

/// Request body for `POST /demands` and `PUT /demands/{id}`.
#[derive(Debug, Deserialize)]
pub struct DemandRequest {
    /// Admin only. Designers always log for themselves.
    pub designer_id: Option<DbId>,
    /// Defaults to today in the studio timezone (create) or the stored date (update).
    pub work_date: Option<NaiveDate>,
    pub title: String,
    pub notes: Option<String>,
    pub items: Vec<DemandItemInput>,
}

/// Query parameters for `GET /demands`.
///
/// Without `period`, `start` and `end` act as plain optional bounds.
#[derive(Debug, Deserialize)]
pub struct DemandListParams {
    pub period: Option<PeriodKind>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub designer_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/demands
pub async fn create_demand(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<DemandRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DemandWithItems>>)> {
    let ctx = StudioContext::load(&state.pool).await?;
    let designer_id = target_designer(&user, input.designer_id, None)?;
    let work_date = input.work_date.unwrap_or(ctx.today);

    let save = prepare_demand(&state, &ctx, &user, designer_id, work_date, input).await?;
    let id = DemandRepo::create(&state.pool, &save).await?;

    let demand = DemandRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Demand", id))?;
    tracing::info!(
        demand_id = id,
        designer_id,
        total_points = demand.demand.total_points,
        "Demand logged"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: demand })))
}

/// GET /api/v1/demands
///
/// History, newest work date first. Designers only see their own demands.
pub async fn list_demands(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<DemandListParams>,
) -> AppResult<Json<DataResponse<Vec<DemandWithItems>>>> {
    let (start, end) = match params.period {
        Some(kind) => {
            let ctx = StudioContext::load(&state.pool).await?;
            let resolved = ctx.resolve(&PeriodParams {
                period: Some(kind),
                start: params.start,
                end: params.end,
                designer_id: None,
            })?;
            (Some(resolved.range.start), Some(resolved.range.end))
        }
        None => (params.start, params.end),
    };

    let filter = DemandFilter {
        designer_id: user.scoped_designer(params.designer_id),
        start,
        end,
        limit: params.limit,
        offset: params.offset,
    };
    let demands = DemandRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: demands }))
}

/// GET /api/v1/demands/{id}
pub async fn get_demand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DemandWithItems>>> {
    let demand = DemandRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Demand", id))?;
    user.ensure_owner_or_admin(demand.demand.designer_id)?;
    Ok(Json(DataResponse { data: demand }))
}

/// PUT /api/v1/demands/{id}
///
/// Replace the demand's fields and items; totals are recomputed.
pub async fn update_demand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<DemandRequest>,
) -> AppResult<Json<DataResponse<DemandWithItems>>> {
    let existing = load_owned(&state, &user, id).await?;
    let ctx = StudioContext::load(&state.pool).await?;
    let designer_id = target_designer(&user, input.designer_id, Some(existing.designer_id))?;
    let work_date = input.work_date.unwrap_or(existing.work_date);

    let save = prepare_demand(&state, &ctx, &user, designer_id, work_date, input).await?;
    if !DemandRepo::replace(&state.pool, id, &save).await? {
        return Err(AppError::not_found("Demand", id));
    }

    let demand = DemandRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Demand", id))?;
    tracing::info!(demand_id = id, total_points = demand.demand.total_points, "Demand updated");

    Ok(Json(DataResponse { data: demand }))
}

/// DELETE /api/v1/demands/{id}
///
/// Soft delete. The demand stops counting towards every total.
pub async fn delete_demand(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &user, id).await?;
    if !DemandRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::not_found("Demand", id));
    }
    tracing::info!(demand_id = id, deleted_by = user.user_id, "Demand deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_owned(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Demand> {
    let demand = DemandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Demand", id))?;
    user.ensure_owner_or_admin(demand.designer_id)?;
    Ok(demand)
}

/// Decide whose demand this is.
///
/// Designers may only name themselves. Admins must name a designer unless
/// they are editing an existing demand, which keeps its owner.
fn target_designer(
    user: &AuthUser,
    requested: Option<DbId>,
    current: Option<DbId>,
) -> AppResult<DbId> {
    if user.is_admin() {
        return requested
            .or(current)
            .ok_or_else(|| AppError::validation("designer_id is required when logging as admin"));
    }
    match requested {
        Some(id) if id != user.user_id => {
            Err(AppError::forbidden("Designers can only log their own demands"))
        }
        _ => Ok(user.user_id),
    }
}

/// Validate the request and price every line from the current art types.
async fn prepare_demand(
    state: &AppState,
    ctx: &StudioContext,
    user: &AuthUser,
    designer_id: DbId,
    work_date: NaiveDate,
    input: DemandRequest,
) -> AppResult<SaveDemand> {
    validate_title(&input.title).map_err(AppError::validation)?;
    validate_notes(input.notes.as_deref()).map_err(AppError::validation)?;
    validate_work_date(work_date, ctx.today).map_err(AppError::validation)?;

    let raw: Vec<(DbId, i64)> = input
        .items
        .iter()
        .map(|i| (i.art_type_id, i.quantity))
        .collect();
    validate_items(&raw).map_err(AppError::validation)?;

    require_active_designer(&state.pool, designer_id).await?;

    let ids: Vec<DbId> = raw
        .iter()
        .map(|(id, _)| *id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let points: HashMap<DbId, i64> = ArtTypeRepo::find_many(&state.pool, &ids)
        .await?
        .into_iter()
        .filter(|a| a.is_active)
        .map(|a| (a.id, a.points))
        .collect();

    let items = raw
        .iter()
        .map(|&(art_type_id, quantity)| {
            points
                .get(&art_type_id)
                .map(|&points_per_unit| PricedItem {
                    art_type_id,
                    quantity,
                    points_per_unit,
                })
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "Art type {art_type_id} does not exist or is inactive"
                    ))
                })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(SaveDemand {
        designer_id,
        work_date,
        title: input.title,
        notes: input.notes.filter(|n| !n.trim().is_empty()),
        items,
        created_by: user.user_id,
    })
}
