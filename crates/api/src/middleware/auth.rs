//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use studio_core::roles::ROLE_ADMIN;
use studio_core::session::is_idle_expired;
use studio_core::types::DbId;
use studio_db::repositories::{SessionRepo, SettingsRepo, UserRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Besides checking the token signature, extraction loads the session named by
/// the `sid` claim. A revoked session, or one idle for longer than the studio's
/// `session_timeout_minutes`, is rejected with 401 (and revoked). Otherwise the
/// session's `last_seen_at` is moved to now. The role is read from the user
/// row, so role changes apply to tokens already issued.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"admin"` or `"designer"`).
    pub role: String,
    /// The login session backing this request (from `claims.sid`).
    pub session_id: DbId,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// The designer a query should be restricted to.
    ///
    /// Admins may look at anyone (or everyone); designers only ever see themselves.
    pub fn scoped_designer(&self, requested: Option<DbId>) -> Option<DbId> {
        if self.is_admin() {
            requested
        } else {
            Some(self.user_id)
        }
    }

    /// Reject unless the caller is an admin or the given user.
    pub fn ensure_owner_or_admin(&self, owner_id: DbId) -> Result<(), AppError> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(AppError::forbidden("You can only access your own records"))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        let session = SessionRepo::find_by_id(&state.pool, claims.sid)
            .await?
            .filter(|s| s.user_id == claims.sub && !s.is_revoked)
            .ok_or_else(|| AppError::unauthorized("Session is no longer valid"))?;

        let now = Utc::now();
        if session.expires_at <= now {
            return Err(AppError::unauthorized("Session is no longer valid"));
        }

        let settings = SettingsRepo::get(&state.pool).await?;
        if is_idle_expired(session.last_seen_at, now, settings.session_timeout_minutes) {
            SessionRepo::revoke(&state.pool, session.id).await?;
            tracing::info!(
                user_id = claims.sub,
                session_id = session.id,
                "Session expired due to inactivity"
            );
            return Err(AppError::unauthorized("Session expired due to inactivity"));
        }

        // Role and status come from the users table, not the token claims.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::unauthorized("Session is no longer valid"))?;

        SessionRepo::touch(&state.pool, session.id, now).await?;

        Ok(AuthUser {
            user_id: user.id,
            role: user.role,
            session_id: session.id,
        })
    }
}
