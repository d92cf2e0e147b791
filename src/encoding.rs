//! Decoding saved pages to UTF-8.
//!
//! "Save page as" keeps the page's original bytes. The charset comes from a
//! byte-order mark if present, else from a `<meta charset>` or
//! `http-equiv` declaration near the top, else UTF-8.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Both `<meta charset=...>` and `content="...; charset=..."` forms.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("META_CHARSET regex")
});

/// Bytes examined for a charset declaration.
const SNIFF_LEN: usize = 2048;

/// Pick the encoding of a saved page.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to UTF-8, replacing invalid sequences with U+FFFD.
#[must_use]
pub fn decode_page(html: &[u8]) -> Cow<'_, str> {
    let (text, _used, _had_errors) = detect_encoding(html).decode(html);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, WINDOWS_1252};

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<html><body>plain</body></html>"), UTF_8);
    }

    #[test]
    fn meta_charset_forms() {
        let a = br#"<meta charset="windows-1252"><p>x</p>"#;
        let b = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        assert_eq!(detect_encoding(a), WINDOWS_1252);
        // ISO-8859-1 is an alias of windows-1252 in the Encoding Standard.
        assert_eq!(detect_encoding(b), WINDOWS_1252);
    }

    #[test]
    fn bom_wins_over_meta() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend_from_slice(b"<\0m\0");
        assert_eq!(detect_encoding(&bytes), UTF_16LE);
    }

    #[test]
    fn decode_windows_1252_page() {
        let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9 \x93quoted\x94</p>";
        let text = decode_page(html);
        assert!(text.contains("Caf\u{e9}"));
        assert!(text.contains("\u{201c}quoted\u{201d}"));
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let html = "<meta charset=\"klingon\"><p>na\u{ef}ve</p>".as_bytes();
        assert_eq!(decode_page(html), "<meta charset=\"klingon\"><p>na\u{ef}ve</p>");
    }
}
