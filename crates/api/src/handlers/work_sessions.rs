//! Handlers for the `/work-sessions` resource (daily clock-in).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use studio_db::models::work_session::WorkSession;
use studio_db::repositories::WorkSessionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireDesigner;
use crate::query::PeriodParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::studio::StudioContext;

#[derive(Debug, Serialize)]
pub struct ClockInResponse {
    pub session: WorkSession,
    /// `false` when the designer had already clocked in today.
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct TodayStatus {
    pub clocked_in: bool,
    pub session: Option<WorkSession>,
}

/// POST /api/v1/work-sessions/clock-in
///
/// Idempotent per designer per studio-local date: 201 on the first call of
/// the day, 200 with the existing session afterwards.
pub async fn clock_in(
    State(state): State<AppState>,
    RequireDesigner(user): RequireDesigner,
) -> AppResult<(StatusCode, Json<DataResponse<ClockInResponse>>)> {
    let ctx = StudioContext::load(&state.pool).await?;
    let (session, created) = WorkSessionRepo::clock_in(&state.pool, user.user_id, ctx.today).await?;

    let status = if created {
        tracing::info!(designer_id = user.user_id, work_date = %ctx.today, "Clocked in");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(DataResponse {
            data: ClockInResponse { session, created },
        }),
    ))
}

/// GET /api/v1/work-sessions/today
pub async fn today(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<TodayStatus>>> {
    let ctx = StudioContext::load(&state.pool).await?;
    let session = WorkSessionRepo::find_for_date(&state.pool, user.user_id, ctx.today).await?;
    Ok(Json(DataResponse {
        data: TodayStatus {
            clocked_in: session.is_some(),
            session,
        },
    }))
}

/// GET /api/v1/work-sessions?period=&start=&end=&designer_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DataResponse<Vec<WorkSession>>>> {
    let ctx = StudioContext::load(&state.pool).await?;
    let resolved = ctx.resolve(&params)?;
    let sessions = WorkSessionRepo::list(
        &state.pool,
        &resolved.range,
        user.scoped_designer(params.designer_id),
    )
    .await?;
    Ok(Json(DataResponse { data: sessions }))
}
