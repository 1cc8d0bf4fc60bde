//! Route definitions for the `/art-types` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::art_types;
use crate::state::AppState;

/// Routes mounted at `/art-types`.
///
/// ```text
/// GET    /       -> list_art_types
/// POST   /       -> create_art_type (admin)
/// PUT    /{id}   -> update_art_type (admin)
/// DELETE /{id}   -> deactivate_art_type (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(art_types::list_art_types).post(art_types::create_art_type),
        )
        .route(
            "/{id}",
            put(art_types::update_art_type).delete(art_types::deactivate_art_type),
        )
}
