//! Route definitions for the `/feedback` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/feedback`.
///
/// ```text
/// GET    /              -> list_feedback
/// POST   /              -> create_feedback (admin)
/// GET    /unread-count  -> unread_count
/// DELETE /{id}          -> delete_feedback (admin)
/// POST   /{id}/read     -> mark_read (recipient)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route("/unread-count", get(feedback::unread_count))
        .route("/{id}", delete(feedback::delete_feedback))
        .route("/{id}/read", post(feedback::mark_read))
}
