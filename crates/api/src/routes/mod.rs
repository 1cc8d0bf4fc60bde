pub mod admin;
pub mod art_types;
pub mod auth;
pub mod awards;
pub mod dashboard;
pub mod demands;
pub mod feedback;
pub mod health;
pub mod lessons;
pub mod links;
pub mod me;
pub mod notifications;
pub mod settings;
pub mod work_sessions;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user
/// /auth/me/password                                change own password (PUT)
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                get, update, deactivate
/// /admin/users/{id}/reset-password                 reset password
/// /designers                                       active designers (admin)
///
/// /art-types                                       list, create
/// /art-types/{id}                                  update, deactivate
///
/// /demands                                         list (history), create
/// /demands/{id}                                    get, replace, soft delete
///
/// /dashboard/summary                               studio summary (admin)
/// /dashboard/daily                                 zero-filled daily series
/// /dashboard/art-types                             per art type breakdown
///
/// /me/dashboard                                    caller's summary
/// /me/level                                        caller's level
/// /me/notifications                                caller's visible banners
///
/// /work-sessions                                   list
/// /work-sessions/clock-in                          clock in (designer)
/// /work-sessions/today                             today's status
///
/// /feedback                                        list, create
/// /feedback/unread-count                           caller's unread count
/// /feedback/{id}                                   delete (admin)
/// /feedback/{id}/read                              mark read (recipient)
///
/// /lessons                                         list, create
/// /lessons/progress                                progress per designer
/// /lessons/progress/summary                        completion summary (admin)
/// /lessons/{id}                                    update, deactivate
/// /lessons/{id}/progress                           set own progress (PUT)
///
/// /settings                                        get, update
///
/// /awards                                          list, create
/// /awards/leaderboard                              monthly leaderboard
/// /awards/{id}                                     delete (admin)
///
/// /links                                           list, create
/// /links/{id}                                      update, deactivate
/// /tags                                            tags with link counts
///
/// /notifications                                   list, create (admin)
/// /notifications/{id}                              update, deactivate (admin)
/// /notifications/{id}/dismiss                      dismiss (recipient)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // User management.
        .nest("/admin", admin::router())
        .route("/designers", get(handlers::admin::list_designers))
        // Catalogue and logged work.
        .nest("/art-types", art_types::router())
        .nest("/demands", demands::router())
        .nest("/work-sessions", work_sessions::router())
        // Reporting.
        .nest("/dashboard", dashboard::router())
        .nest("/me", me::router())
        // Designer development and communication.
        .nest("/feedback", feedback::router())
        .nest("/lessons", lessons::router())
        .nest("/awards", awards::router())
        .nest("/links", links::router())
        .route("/tags", get(handlers::links::list_tags))
        .nest("/notifications", notifications::router())
        // Studio configuration.
        .nest("/settings", settings::router())
}
