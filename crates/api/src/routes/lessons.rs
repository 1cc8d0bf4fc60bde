//! Route definitions for the `/lessons` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::lessons;
use crate::state::AppState;

/// Routes mounted at `/lessons`.
///
/// ```text
/// GET    /                  -> list_lessons
/// POST   /                  -> create_lesson (admin)
/// GET    /progress          -> list_progress
/// GET    /progress/summary  -> progress_summary (admin)
/// PUT    /{id}              -> update_lesson (admin)
/// DELETE /{id}              -> delete_lesson (admin)
/// PUT    /{id}/progress     -> set_progress (designer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lessons::list_lessons).post(lessons::create_lesson))
        .route("/progress", get(lessons::list_progress))
        .route("/progress/summary", get(lessons::progress_summary))
        .route(
            "/{id}",
            put(lessons::update_lesson).delete(lessons::delete_lesson),
        )
        .route("/{id}/progress", put(lessons::set_progress))
}
