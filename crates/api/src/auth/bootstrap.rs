//! First-run admin provisioning.

use studio_core::roles::ROLE_ADMIN;
use studio_db::models::user::{CreateUser, User};
use studio_db::repositories::UserRepo;
use studio_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured admin account if the studio has no active admin.
///
/// Returns the created user, or `None` when an admin already exists.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<Option<User>> {
    if UserRepo::count_active_admins(pool).await? > 0 {
        return Ok(None);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::validation)?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.trim().to_string(),
            display_name: admin.username.trim().to_string(),
            email: None,
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");

    Ok(Some(user))
}
