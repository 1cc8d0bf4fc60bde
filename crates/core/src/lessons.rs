//! Lesson progress statuses and completion math.

pub const STATUS_NOT_STARTED: &str = "not_started";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid progress statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_NOT_STARTED, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Maximum length of a lesson description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid lesson status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

pub fn validate_description(description: Option<&str>) -> Result<(), String> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => Err(format!(
            "Lesson description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )),
        _ => Ok(()),
    }
}

/// Percentage of `total` lessons completed, rounded to one decimal.
///
/// Zero lessons count as fully complete.
pub fn completion_pct(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 100.0;
    }
    let pct = completed.min(total) as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert!(validate_status("completed").is_ok());
        assert!(validate_status("done").is_err());
    }

    #[test]
    fn completion() {
        assert_eq!(completion_pct(0, 0), 100.0);
        assert_eq!(completion_pct(1, 3), 33.3);
        assert_eq!(completion_pct(3, 3), 100.0);
        assert_eq!(completion_pct(5, 3), 100.0);
    }

    #[test]
    fn description_length() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some(&"x".repeat(MAX_DESCRIPTION_LENGTH + 1))).is_err());
    }
}
