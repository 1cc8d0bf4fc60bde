//! Repository for the `users` table.

use sqlx::SqlitePool;
use studio_core::roles::{ROLE_ADMIN, ROLE_DESIGNER};
use studio_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, DesignerOption, UpdateUser, User};
use crate::NOW;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, display_name, email, password_hash, role, is_active, \
                       last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, display_name, email, password_hash, role)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List active designers alphabetically by display name.
    pub async fn list_designers(pool: &SqlitePool) -> Result<Vec<DesignerOption>, sqlx::Error> {
        sqlx::query_as::<_, DesignerOption>(
            "SELECT id, username, display_name FROM users
             WHERE role = ?1 AND is_active = TRUE
             ORDER BY display_name",
        )
        .bind(ROLE_DESIGNER)
        .fetch_all(pool)
        .await
    }

    /// Find an active designer by ID. Returns `None` for admins and inactive users.
    pub async fn find_active_designer(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE id = ?1 AND role = ?2 AND is_active = TRUE"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(ROLE_DESIGNER)
            .fetch_optional(pool)
            .await
    }

    /// Count active admins; used to decide whether to bootstrap one.
    pub async fn count_active_admins(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ?1 AND is_active = TRUE")
            .bind(ROLE_ADMIN)
            .fetch_one(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE(?2, username),
                display_name = COALESCE(?3, display_name),
                email = COALESCE(?4, email),
                role = COALESCE(?5, role),
                is_active = COALESCE(?6, is_active),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a user by setting `is_active = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE users SET is_active = FALSE, updated_at = {NOW}
             WHERE id = ?1 AND is_active = TRUE"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter by 1, returning the new count.
    pub async fn increment_failed_login(pool: &SqlitePool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET failed_login_count = failed_login_count + 1
             WHERE id = ?1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Clear a lock that has run out, restarting the failure count at 0.
    pub async fn clear_expired_lock(pool: &SqlitePool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = 0, locked_until = NULL WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock a user account until the specified timestamp.
    pub async fn lock_account(
        pool: &SqlitePool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = ?2 WHERE id = ?1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear `locked_until`,
    /// and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &SqlitePool, id: DbId) -> Result<(), sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = {NOW}
             WHERE id = ?1"
        );
        sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(())
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &SqlitePool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE users SET password_hash = ?2, failed_login_count = 0, locked_until = NULL,
                updated_at = {NOW}
             WHERE id = ?1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
