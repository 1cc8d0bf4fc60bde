//! Route definitions for the `/work-sessions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::work_sessions;
use crate::state::AppState;

/// Routes mounted at `/work-sessions`.
///
/// ```text
/// GET  /          -> list
/// POST /clock-in  -> clock_in (designer)
/// GET  /today     -> today
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(work_sessions::list))
        .route("/clock-in", post(work_sessions::clock_in))
        .route("/today", get(work_sessions::today))
}
