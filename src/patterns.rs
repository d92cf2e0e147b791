//! Compiled regex patterns and fixed markup constants.
//!
//! All patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Normalization Patterns
// =============================================================================

/// Matches `<br>`, `<br/>` and `<br />` in any case.
pub static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("LINE_BREAK_TAG regex"));

/// Matches the word "hashtag" the feed injects before every `#tag` link.
///
/// ASCII word boundaries, so "hashtags" or "myhashtag" are left alone.
pub static HASHTAG_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)\bhashtag\b").expect("HASHTAG_WORD regex"));

// =============================================================================
// Identifier Patterns
// =============================================================================

/// Matches a quoted activity URN inside serialized markup, quotes included.
pub static ACTIVITY_URN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""urn:li:activity:[^"]*""#).expect("ACTIVITY_URN regex"));

/// Matches the 19-digit post identifier embedded in a permalink.
pub static POST_ID_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{19}").expect("POST_ID_DIGITS regex"));

// =============================================================================
// Fixed Markup Constants
// =============================================================================

/// Prefix prepended to an activity URN to form the canonical permalink.
pub const PERMALINK_BASE: &str = "https://www.linkedin.com/feed/update/";

/// Separator between the date and the timezone annotation in `datePost`.
pub const DATE_ZONE_SEPARATOR: &str = "<br />";

/// Elements a content fragment is split into, one line each.
pub const LINE_ELEMENT_SELECTOR: &str = "p, span, div";

/// Line elements that make their parent a container instead of a line.
pub const BLOCK_ELEMENT_SELECTOR: &str = "p, div";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_break_tag_matches_all_spellings() {
        for tag in ["<br>", "<BR>", "<br/>", "<br />", "<Br  />"] {
            assert!(LINE_BREAK_TAG.is_match(tag), "{tag}");
        }
        assert!(!LINE_BREAK_TAG.is_match("<bro>"));
    }

    #[test]
    fn hashtag_word_is_whole_word_only() {
        assert!(HASHTAG_WORD.is_match("hashtag#rust"));
        assert!(HASHTAG_WORD.is_match("HashTag"));
        assert!(!HASHTAG_WORD.is_match("hashtags"));
        assert!(!HASHTAG_WORD.is_match("myhashtag"));
    }

    #[test]
    fn activity_urn_includes_quotes() {
        let html = r#"<div data-urn="urn:li:activity:7123456789012345678"></div>"#;
        let m = ACTIVITY_URN.find(html).map(|m| m.as_str());
        assert_eq!(m, Some(r#""urn:li:activity:7123456789012345678""#));
    }

    #[test]
    fn post_id_digits_takes_first_nineteen() {
        let m = POST_ID_DIGITS.find("x/123456789012345678901").map(|m| m.as_str());
        assert_eq!(m, Some("1234567890123456789"));
        assert!(!POST_ID_DIGITS.is_match("123456789012345678"));
    }
}
