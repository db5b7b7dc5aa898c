use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Syntactic plausibility check only. No DNS or deliverability lookup.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_address_is_valid() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("first.last+news@mail.example.co.uk"));
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_without_at_is_invalid() {
        for s in ["reader.example.com", "plain", "a.b.c", "   ", "x."] {
            assert!(!is_valid_email(s), "{s:?} should be rejected");
        }
    }

    #[test]
    fn test_whitespace_is_invalid() {
        assert!(!is_valid_email("read er@example.com"));
        assert!(!is_valid_email(" reader@example.com"));
        assert!(!is_valid_email("reader@example.com\n"));
    }

    #[test]
    fn test_missing_dot_in_domain_is_invalid() {
        assert!(!is_valid_email("reader@localhost"));
        assert!(!is_valid_email("reader@example."));
    }

    #[test]
    fn test_permissive_pattern_is_kept() {
        // Not hardened: odd but syntactically matching strings pass.
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("!#$@x.y.z"));
        assert!(!is_valid_email("a@@b.c"));
    }
}
