use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // U+FEFF is listed beside \s so the byte order mark counts as whitespace.
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@\x{FEFF}]+@[^\s@\x{FEFF}]+\.[^\s@\x{FEFF}]+$")
            .expect("email pattern compiles")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

pub fn parse_booking_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_simple_address() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("x@y.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
    }

    #[test]
    fn test_rejects_missing_tld() {
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn test_rejects_double_at() {
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(" a@b.com"));
    }

    #[test]
    fn test_rejects_byte_order_mark() {
        assert!(!is_valid_email("a\u{FEFF}b@c.com"));
        assert!(!is_valid_email("a@c\u{FEFF}.com"));
        assert!(!is_valid_email("a@c.c\u{FEFF}om"));
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn test_parse_booking_date() {
        assert_eq!(
            parse_booking_date("2025-01-01"),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert!(parse_booking_date("2025-02-30").is_none());
        assert!(parse_booking_date("01/01/2025").is_none());
    }
}
