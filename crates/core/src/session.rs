//! Session idle-timeout rules (automatic logout).
//!
//! Every authenticated request refreshes a session's `last_seen_at`. A
//! session left idle for longer than the studio's configured timeout is
//! treated as logged out.

use chrono::Duration;

use crate::types::Timestamp;

/// Shortest idle timeout an administrator may configure.
pub const MIN_SESSION_TIMEOUT_MINUTES: i64 = 5;

/// Longest idle timeout an administrator may configure (12 hours).
pub const MAX_SESSION_TIMEOUT_MINUTES: i64 = 720;

/// Idle timeout used until settings are changed.
pub const DEFAULT_SESSION_TIMEOUT_MINUTES: i64 = 60;

/// Whether a session last seen at `last_seen_at` has been idle too long.
///
/// A session exactly at the limit is still valid.
pub fn is_idle_expired(last_seen_at: Timestamp, now: Timestamp, timeout_minutes: i64) -> bool {
    now - last_seen_at > Duration::minutes(timeout_minutes)
}

pub fn validate_timeout_minutes(minutes: i64) -> Result<(), String> {
    if !(MIN_SESSION_TIMEOUT_MINUTES..=MAX_SESSION_TIMEOUT_MINUTES).contains(&minutes) {
        return Err(format!(
            "Session timeout must be between {MIN_SESSION_TIMEOUT_MINUTES} and \
             {MAX_SESSION_TIMEOUT_MINUTES} minutes"
        ));
    }
    Ok(())
}
