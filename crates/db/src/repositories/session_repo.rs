//! Repository for the `user_sessions` table.

use chrono::Utc;
use sqlx::SqlitePool;
use studio_core::types::{DbId, Timestamp};

use crate::models::session::{CreateSession, UserSession};
use crate::NOW;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, last_seen_at, is_revoked, \
                       user_agent, ip_address, created_at, updated_at";

/// Provides CRUD operations for user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    ///
    /// `last_seen_at` starts at the creation time.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateSession,
    ) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions
                (user_id, refresh_token_hash, expires_at, last_seen_at, user_agent, ip_address)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .bind(Utc::now())
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// Find a session by ID regardless of its state.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE id = ?1");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active session by its refresh token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_by_refresh_token_hash(
        pool: &SqlitePool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = ?1
               AND is_revoked = FALSE"
        );
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await?;
        let now = Utc::now();
        Ok(session.filter(|s| s.expires_at > now))
    }

    /// Record activity on a session.
    pub async fn touch(pool: &SqlitePool, id: DbId, at: Timestamp) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_sessions SET last_seen_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(at)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Move `last_seen_at` to an explicit point in time.
    ///
    /// Used by tests to simulate an idle session.
    pub async fn set_last_seen(
        pool: &SqlitePool,
        id: DbId,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        Self::touch(pool, id, at).await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = TRUE, updated_at = {NOW}
             WHERE id = ?1 AND is_revoked = FALSE"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all active sessions for a user. Returns the count of revoked sessions.
    pub async fn revoke_all_for_user(pool: &SqlitePool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = TRUE, updated_at = {NOW}
             WHERE user_id = ?1 AND is_revoked = FALSE"
        );
        let result = sqlx::query(&query).bind(user_id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Delete expired or revoked sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &SqlitePool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE expires_at < ?1 OR is_revoked = TRUE")
                .bind(now)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
