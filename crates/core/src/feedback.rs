//! Feedback categories and content validation.

/// Maximum length of feedback content in characters.
pub const MAX_FEEDBACK_CONTENT_LENGTH: usize = 5_000;

pub const CATEGORY_POSITIVE: &str = "positive";
pub const CATEGORY_IMPROVEMENT: &str = "improvement";
pub const CATEGORY_GENERAL: &str = "general";

/// All valid feedback categories.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_POSITIVE, CATEGORY_IMPROVEMENT, CATEGORY_GENERAL];

pub fn validate_category(category: &str) -> Result<(), String> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(format!(
            "Invalid feedback category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        ))
    }
}

/// Content must be non-blank and within the length limit.
pub fn validate_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Feedback content cannot be empty".to_string());
    }
    if content.chars().count() > MAX_FEEDBACK_CONTENT_LENGTH {
        return Err(format!(
            "Feedback content exceeds maximum length of {MAX_FEEDBACK_CONTENT_LENGTH} characters"
        ));
    }
    Ok(())
}
