//! Useful-link validation and tag name normalization.

use url::Url;

/// Maximum length of a link or lesson title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a URL.
pub const MAX_URL_LENGTH: usize = 2_048;

/// Maximum length of a normalized tag name.
pub const MAX_TAG_LENGTH: usize = 50;

/// Maximum number of tags on a single link.
pub const MAX_TAGS_PER_LINK: usize = 20;

/// Validate that `url` is an absolute `http` or `https` URL with a host.
pub fn validate_http_url(url: &str) -> Result<(), String> {
    if url.len() > MAX_URL_LENGTH {
        return Err(format!("URL exceeds maximum length of {MAX_URL_LENGTH}"));
    }
    let parsed = Url::parse(url).map_err(|e| format!("URL '{url}' is invalid: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("URL '{url}' must start with http:// or https://"));
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(format!("URL '{url}' has no valid host")),
    }
}

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Normalize a tag: trim, lowercase, collapse inner whitespace to `-`.
pub fn normalize_tag_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalize and de-duplicate a tag list, preserving first-seen order.
pub fn normalize_tags(raw: &[String]) -> Result<Vec<String>, String> {
    let mut tags: Vec<String> = Vec::new();
    for name in raw {
        let normalized = normalize_tag_name(name);
        if normalized.is_empty() {
            return Err("Tag names cannot be empty".to_string());
        }
        if normalized.chars().count() > MAX_TAG_LENGTH {
            return Err(format!(
                "Tag '{normalized}' exceeds maximum length of {MAX_TAG_LENGTH} characters"
            ));
        }
        if !tags.contains(&normalized) {
            tags.push(normalized);
        }
    }
    if tags.len() > MAX_TAGS_PER_LINK {
        return Err(format!(
            "A link cannot have more than {MAX_TAGS_PER_LINK} tags"
        ));
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_urls_accepted() {
        assert!(validate_http_url("https://fonts.google.com").is_ok());
        assert!(validate_http_url("http://example.com/path?q=1").is_ok());
    }

    #[test]
    fn bad_urls_rejected() {
        assert!(validate_http_url("ftp://example.com").is_err());
        assert!(validate_http_url("example.com").is_err());
        assert!(validate_http_url("https://").is_err());
        assert!(validate_http_url("http://:80").is_err());
        assert!(validate_http_url("https://@").is_err());
        assert!(validate_http_url("https://exa<mple>.com").is_err());
        assert!(validate_http_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn tag_normalization() {
        assert_eq!(normalize_tag_name("  Color   Palettes "), "color-palettes");
        assert_eq!(normalize_tag_name("UI"), "ui");
        assert_eq!(normalize_tag_name("   "), "");
    }

    #[test]
    fn tag_list_deduplicated_in_order() {
        let raw = vec!["Icons".to_string(), "fonts".to_string(), "ICONS".to_string()];
        assert_eq!(normalize_tags(&raw).unwrap(), ["icons", "fonts"]);
    }

    #[test]
    fn tag_list_rejects_blank_and_too_many() {
        assert!(normalize_tags(&[" ".to_string()]).is_err());
        let many: Vec<String> = (0..=MAX_TAGS_PER_LINK).map(|i| format!("t{i}")).collect();
        assert!(normalize_tags(&many).is_err());
    }

    #[test]
    fn titles() {
        assert!(validate_title("Mockup templates").is_ok());
        assert!(validate_title("").is_err());
    }
}
