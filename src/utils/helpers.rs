//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;
use std::sync::OnceLock;

/// Phone numbers may contain digits, spaces, dashes, plus and parentheses
const PHONE_PATTERN: &str = r"^[\d\s\-+()]+$";

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).expect("static phone pattern"))
}

/// Validate a phone number: allowed characters only, at least 10 of them
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() >= 10 && phone_regex().is_match(phone)
}

/// Validate a display name (at least 2 characters after trimming)
pub fn is_valid_full_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// Build a URL slug from a title. Non-alphanumeric runs collapse into a
/// single dash; Arabic titles with no ASCII content fall back to "event".
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "event".to_string()
    } else {
        slug
    }
}

/// Random alphanumeric token for prospect-vendor claims
pub fn generate_claim_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Calculate pagination offset
pub fn calculate_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+905551234567"));
        assert!(is_valid_phone("0555 123 45 67"));
        assert!(is_valid_phone("(0212) 555-1234"));
        assert!(!is_valid_phone("bad"));
        assert!(!is_valid_phone("555-CALL-NOW"));
        assert!(!is_valid_phone("12345"));
    }

    #[test]
    fn test_full_name_validation() {
        assert!(is_valid_full_name("Ay"));
        assert!(is_valid_full_name("Ayşe Yılmaz"));
        assert!(!is_valid_full_name("A"));
        assert!(!is_valid_full_name("  A  "));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Bosphorus Jazz Night"), "bosphorus-jazz-night");
        assert_eq!(slugify("  Sunset -- Cruise!  "), "sunset-cruise");
        assert_eq!(slugify("ليلة الجاز"), "event");
        assert_eq!(slugify("Gala 2026"), "gala-2026");
    }

    #[test]
    fn test_claim_token_shape() {
        let token = generate_claim_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a very long description", 10), "a very ...");
    }

    #[test]
    fn test_calculate_offset() {
        assert_eq!(calculate_offset(1, 50), 0);
        assert_eq!(calculate_offset(3, 20), 40);
        assert_eq!(calculate_offset(0, 20), 0);
    }
}
