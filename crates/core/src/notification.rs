//! Designer banner notification levels and visibility.

use crate::types::Timestamp;

pub const LEVEL_INFO: &str = "info";
pub const LEVEL_SUCCESS: &str = "success";
pub const LEVEL_WARNING: &str = "warning";

/// All valid notification levels.
pub const VALID_LEVELS: &[&str] = &[LEVEL_INFO, LEVEL_SUCCESS, LEVEL_WARNING];

/// Maximum length of a banner message.
pub const MAX_MESSAGE_LENGTH: usize = 1_000;

pub fn validate_level(level: &str) -> Result<(), String> {
    if VALID_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(format!(
            "Invalid notification level '{level}'. Must be one of: {}",
            VALID_LEVELS.join(", ")
        ))
    }
}

pub fn validate_message(message: &str) -> Result<(), String> {
    if message.trim().is_empty() {
        return Err("Notification message cannot be empty".to_string());
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(format!(
            "Notification message exceeds maximum length of {MAX_MESSAGE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// A banner is shown while active, not dismissed, and not past `expires_at`.
pub fn is_visible(
    is_active: bool,
    dismissed_at: Option<Timestamp>,
    expires_at: Option<Timestamp>,
    now: Timestamp,
) -> bool {
    is_active && dismissed_at.is_none() && expires_at.map_or(true, |exp| exp > now)
}
