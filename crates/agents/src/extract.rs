//! Postal-code extraction from free text.

use regex::Regex;
use std::sync::LazyLock;

// Eight digits, optionally hyphenated after the fifth: 01310-100 or 01310100
static POSTAL_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}-?\d{3}\b").unwrap());

/// First postal code mentioned in `message`, as written.
pub fn extract_postal_code(message: &str) -> Option<&str> {
    POSTAL_CODE_PATTERN.find(message).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_hyphenated_and_plain_codes() {
        assert_eq!(
            extract_postal_code("Analyze postal code 13571-385 please"),
            Some("13571-385")
        );
        assert_eq!(extract_postal_code("cep 01310100?"), Some("01310100"));
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            extract_postal_code("compare 01310-100 with 20040-002"),
            Some("01310-100")
        );
    }

    #[test]
    fn ignores_longer_digit_runs() {
        assert_eq!(extract_postal_code("order 1234567890"), None);
        assert_eq!(extract_postal_code("call 0131-0100"), None);
        assert_eq!(extract_postal_code("hello there"), None);
    }
}
