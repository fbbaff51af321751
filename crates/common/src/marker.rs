//! The failure marker carried by every user-facing error string.
//!
//! Services answer HTTP 200 with text even when something went wrong, so
//! callers detect failure by looking for [`ERROR_MARKER`] in the text.

use std::fmt::Display;

pub const ERROR_MARKER: &str = "❌";

/// Prefix `text` with the failure marker.
pub fn mark(text: impl Display) -> String {
    format!("{ERROR_MARKER} {text}")
}

/// Whether `text` carries the failure marker anywhere.
pub fn is_marked(text: &str) -> bool {
    text.contains(ERROR_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CepnetError;

    #[test]
    fn marked_error_keeps_message() {
        let text = mark(CepnetError::NotFound("00000000".into()));
        assert_eq!(text, "❌ Postal code 00000000 not found");
        assert!(is_marked(&text));
    }

    #[test]
    fn marker_detected_mid_text() {
        assert!(is_marked("Address analysis\n\n❌ Lookup failed"));
        assert!(!is_marked("📍 Postal code found: 01310-100"));
    }
}
