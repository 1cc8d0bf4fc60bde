//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary    -> summary (admin)
/// GET /daily      -> daily
/// GET /art-types  -> art_types
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/daily", get(dashboard::daily))
        .route("/art-types", get(dashboard::art_types))
}
