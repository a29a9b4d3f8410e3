//! Input checks and formatting for funnel fields

use regex::Regex;
use std::sync::LazyLock;

static ZIP_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("zip code pattern"));

// Browser `\s` also covers U+FEFF, which Unicode does not count as white space
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("email pattern")
});

/// 5-digit ZIP or ZIP+4
pub fn is_valid_zip_code(zip: &str) -> bool {
    ZIP_CODE_REGEX.is_match(zip)
}

/// Keep only digits, at most five of them (what the ZIP box accepts)
pub fn sanitize_zip_input(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(5).collect()
}

/// Loose shape check: something@something.something, no white space
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Digits of a phone number, capped at ten
pub fn phone_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(10).collect()
}

/// Display form of a phone number as it is being typed:
/// "555" -> "555", "5551" -> "(555) 1", "5551234567" -> "(555) 123-4567"
pub fn format_phone(input: &str) -> String {
    let digits = phone_digits(input);
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_code_format() {
        assert!(is_valid_zip_code("90210"));
        assert!(is_valid_zip_code("90210-1234"));
        assert!(!is_valid_zip_code("9021"));
        assert!(!is_valid_zip_code("902101"));
        assert!(!is_valid_zip_code("9021a"));
        assert!(!is_valid_zip_code("90210-123"));
        assert!(!is_valid_zip_code("90210 1234"));
        assert!(!is_valid_zip_code(""));
    }

    #[test]
    fn test_sanitize_zip_input() {
        assert_eq!(sanitize_zip_input("90-210"), "90210");
        assert_eq!(sanitize_zip_input(" 9 0 2 1 0 9 9"), "90210");
        assert_eq!(sanitize_zip_input("abc"), "");
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@example."));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@@example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane.example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_rejects_byte_order_mark() {
        assert!(!is_valid_email("jane\u{feff}@example.com"));
        assert!(!is_valid_email("jane@example.com\u{feff}"));
        assert!(!is_valid_email("jane@exa\tmple.com"));
    }

    #[test]
    fn test_zip_code_ascii_digits_only() {
        // Arabic-Indic digits are Unicode digits but not ZIP digits
        assert!(!is_valid_zip_code("\u{0669}\u{0660}\u{0662}\u{0661}\u{0660}"));
        assert!(!is_valid_zip_code("90210-\u{0661}\u{0662}\u{0663}\u{0664}"));
    }

    #[test]
    fn test_email_dot_anywhere_after_text() {
        // any dot with text on both sides is enough
        assert!(is_valid_email("x@.a.com"));
        assert!(is_valid_email("x@a..com"));
    }

    #[test]
    fn test_phone_formatting() {
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("555"), "555");
        assert_eq!(format_phone("5551"), "(555) 1");
        assert_eq!(format_phone("555123"), "(555) 123");
        assert_eq!(format_phone("5551234"), "(555) 123-4");
        assert_eq!(format_phone("(555) 123-4567 ext 9"), "(555) 123-4567");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_phone_digits() {
        assert_eq!(phone_digits("(555) 123-4567"), "5551234567");
        assert_eq!(phone_digits("555-123"), "555123");
    }
}
