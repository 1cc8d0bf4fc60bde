//! Route definitions for the `/awards` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::awards;
use crate::state::AppState;

/// Routes mounted at `/awards`.
///
/// ```text
/// GET    /             -> list_awards
/// POST   /             -> create_award (admin)
/// GET    /leaderboard  -> leaderboard
/// DELETE /{id}         -> delete_award (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(awards::list_awards).post(awards::create_award))
        .route("/leaderboard", get(awards::leaderboard))
        .route("/{id}", delete(awards::delete_award))
}
