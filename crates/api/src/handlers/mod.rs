//! HTTP handlers, one module per resource.

pub mod admin;
pub mod art_types;
pub mod auth;
pub mod awards;
pub mod dashboard;
pub mod demands;
pub mod feedback;
pub mod lessons;
pub mod links;
pub mod notifications;
pub mod settings;
pub mod work_sessions;

use studio_core::types::DbId;
use studio_db::models::user::User;
use studio_db::repositories::UserRepo;
use studio_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load an active designer, rejecting unknown ids, admins and inactive users with 400.
pub(crate) async fn require_active_designer(pool: &DbPool, designer_id: DbId) -> AppResult<User> {
    UserRepo::find_active_designer(pool, designer_id)
        .await?
        .ok_or_else(|| {
            AppError::validation(format!("User {designer_id} is not an active designer"))
        })
}
