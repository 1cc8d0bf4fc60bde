//! Validation for the singleton studio settings row.

use crate::period::{parse_timezone, WeekStart};
use crate::session::validate_timeout_minutes;

/// Maximum length of the studio display name.
pub const MAX_STUDIO_NAME_LENGTH: usize = 100;

/// Upper bound on the daily points goal.
pub const MAX_DAILY_POINTS_GOAL: i64 = 10_000;

/// A proposed settings change. `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct SettingsChange<'a> {
    pub studio_name: Option<&'a str>,
    pub timezone: Option<&'a str>,
    pub week_start: Option<&'a str>,
    pub session_timeout_minutes: Option<i64>,
    pub daily_points_goal: Option<i64>,
}

/// Validate every field present in `change`, reporting the first problem.
pub fn validate_change(change: &SettingsChange<'_>) -> Result<(), String> {
    if let Some(name) = change.studio_name {
        if name.trim().is_empty() {
            return Err("Studio name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_STUDIO_NAME_LENGTH {
            return Err(format!(
                "Studio name exceeds maximum length of {MAX_STUDIO_NAME_LENGTH} characters"
            ));
        }
    }
    if let Some(tz) = change.timezone {
        parse_timezone(tz)?;
    }
    if let Some(ws) = change.week_start {
        WeekStart::parse(ws)?;
    }
    if let Some(minutes) = change.session_timeout_minutes {
        validate_timeout_minutes(minutes)?;
    }
    if let Some(goal) = change.daily_points_goal {
        if !(1..=MAX_DAILY_POINTS_GOAL).contains(&goal) {
            return Err(format!(
                "Daily points goal must be between 1 and {MAX_DAILY_POINTS_GOAL}"
            ));
        }
    }
    Ok(())
}
