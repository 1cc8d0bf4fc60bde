//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /              -> list_notifications (admin)
/// POST   /              -> create_notification (admin)
/// PUT    /{id}          -> update_notification (admin)
/// DELETE /{id}          -> delete_notification (admin)
/// POST   /{id}/dismiss  -> dismiss_notification (recipient)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/{id}",
            put(notifications::update_notification).delete(notifications::delete_notification),
        )
        .route("/{id}/dismiss", post(notifications::dismiss_notification))
}
