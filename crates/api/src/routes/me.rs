//! Route definitions for caller-scoped `/me` views.

use axum::routing::get;
use axum::Router;

use crate::handlers::{awards, dashboard, notifications};
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET /dashboard      -> dashboard::my_summary
/// GET /level          -> awards::my_level
/// GET /notifications  -> notifications::my_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::my_summary))
        .route("/level", get(awards::my_level))
        .route("/notifications", get(notifications::my_notifications))
}
