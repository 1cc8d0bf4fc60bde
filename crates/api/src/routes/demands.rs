//! Route definitions for the `/demands` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::demands;
use crate::state::AppState;

/// Routes mounted at `/demands`.
///
/// ```text
/// GET    /       -> list_demands
/// POST   /       -> create_demand
/// GET    /{id}   -> get_demand
/// PUT    /{id}   -> update_demand
/// DELETE /{id}   -> delete_demand
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(demands::list_demands).post(demands::create_demand))
        .route(
            "/{id}",
            get(demands::get_demand)
                .put(demands::update_demand)
                .delete(demands::delete_demand),
        )
}
