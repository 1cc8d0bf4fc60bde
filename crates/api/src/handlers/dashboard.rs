//! Handlers for `/dashboard` and `/me/dashboard`.
//!
//! SQL returns grouped sums; the comparisons, averages and zero-filled series
//! come from `studio_core::dashboard`.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use studio_core::dashboard::{
    fill_daily_series, percent_change, summarize_designers, DailyPoint,
    DesignerSummary, DesignerTotals, Totals,
};
use studio_core::period::{elapsed_business_days, ResolvedPeriod};
use studio_core::types::DbId;
use studio_db::models::dashboard::ArtTypeTotalsRow;
use studio_db::repositories::DashboardRepo;
use studio_db::DbPool;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PeriodParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::studio::StudioContext;

/// Response for `GET /dashboard/summary` and `GET /me/dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub period: ResolvedPeriod,
    pub totals: Totals,
    pub previous_totals: Totals,
    /// `None` when the previous period had no points.
    pub points_change_pct: Option<f64>,
    pub quantity_change_pct: Option<f64>,
    pub demands_change_pct: Option<f64>,
    pub elapsed_business_days: i64,
    pub daily_points_goal: i64,
    pub designers: Vec<DesignerSummary>,
}

/// Response for `GET /dashboard/daily`.
#[derive(Debug, Serialize)]
pub struct DailySeries {
    pub period: ResolvedPeriod,
    pub days: Vec<DailyPoint>,
}

/// Response for `GET /dashboard/art-types`.
#[derive(Debug, Serialize)]
pub struct ArtTypeBreakdown {
    pub period: ResolvedPeriod,
    pub art_types: Vec<ArtTypeTotalsRow>,
}

/// GET /api/v1/dashboard/summary?period=&start=&end=&designer_id=
pub async fn summary(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let ctx = StudioContext::load(&state.pool).await?;
    let resolved = ctx.resolve(&params)?;
    let data = build_summary(&state.pool, &ctx, resolved, params.designer_id).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/me/dashboard?period=&start=&end=
///
/// The summary restricted to the caller.
pub async fn my_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let ctx = StudioContext::load(&state.pool).await?;
    let resolved = ctx.resolve(&params)?;
    let data = build_summary(&state.pool, &ctx, resolved, Some(user.user_id)).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/dashboard/daily?period=&start=&end=&designer_id=
///
/// One entry per day of the range. Designers only see their own series.
pub async fn daily(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DataResponse<DailySeries>>> {
    let ctx = StudioContext::load(&state.pool).await?;
    let resolved = ctx.resolve(&params)?;
    let designer_id = user.scoped_designer(params.designer_id);

    let rows: Vec<DailyPoint> = DashboardRepo::daily_totals(&state.pool, &resolved.range, designer_id)
        .await?
        .into_iter()
        .map(DailyPoint::from)
        .collect();

    Ok(Json(DataResponse {
        data: DailySeries {
            days: fill_daily_series(&resolved.range, &rows),
            period: resolved,
        },
    }))
}

/// GET /api/v1/dashboard/art-types?period=&start=&end=&designer_id=
pub async fn art_types(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DataResponse<ArtTypeBreakdown>>> {
    let ctx = StudioContext::load(&state.pool).await?;
    let resolved = ctx.resolve(&params)?;
    let designer_id = user.scoped_designer(params.designer_id);

    let art_types =
        DashboardRepo::art_type_totals(&state.pool, &resolved.range, designer_id).await?;
    Ok(Json(DataResponse {
        data: ArtTypeBreakdown {
            period: resolved,
            art_types,
        },
    }))
}

async fn build_summary(
    pool: &DbPool,
    ctx: &StudioContext,
    resolved: ResolvedPeriod,
    designer_id: Option<DbId>,
) -> AppResult<DashboardSummary> {
    let current: Vec<DesignerTotals> =
        DashboardRepo::designer_totals(pool, &resolved.range, designer_id)
            .await?
            .into_iter()
            .map(DesignerTotals::from)
            .collect();

    let totals: Totals = DashboardRepo::studio_totals(pool, &resolved.range, designer_id)
        .await?
        .into();
    let previous_totals: Totals =
        DashboardRepo::studio_totals(pool, &resolved.previous, designer_id)
            .await?
            .into();
    let elapsed = elapsed_business_days(&resolved.range, ctx.today);
    let goal = ctx.settings.daily_points_goal;

    Ok(DashboardSummary {
        period: resolved,
        points_change_pct: percent_change(totals.points, previous_totals.points),
        quantity_change_pct: percent_change(totals.quantity, previous_totals.quantity),
        demands_change_pct: percent_change(totals.demands, previous_totals.demands),
        totals,
        previous_totals,
        elapsed_business_days: elapsed,
        daily_points_goal: goal,
        designers: summarize_designers(&current, elapsed, goal),
    })
}
