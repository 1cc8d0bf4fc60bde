//! Route definitions for the `/links` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::links;
use crate::state::AppState;

/// Routes mounted at `/links`.
///
/// ```text
/// GET    /       -> list_links
/// POST   /       -> create_link (admin)
/// PUT    /{id}   -> update_link (admin)
/// DELETE /{id}   -> delete_link (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(links::list_links).post(links::create_link))
        .route("/{id}", put(links::update_link).delete(links::delete_link))
}
