//! Human-formatted count parsing ("1,234 views" → 1234).

/// Parse the first integer in `text`, ignoring thousands separators.
///
/// A comma or whitespace character is dropped only when both neighbours
/// are ASCII digits, so "1,234 views" reads as 1234 while "12, 3" keeps its
/// separator and reads as 12. Returns 0 when `text` has no digits.
/// Values beyond `u64::MAX` saturate.
#[must_use]
pub fn parse_count(text: &str) -> u64 {
    let cleaned = strip_digit_separators(text);

    let digits: &str = match cleaned.find(|c: char| c.is_ascii_digit()) {
        Some(start) => {
            let rest = &cleaned[start..];
            let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            &rest[..end]
        }
        None => return 0,
    };

    digits.parse().unwrap_or(u64::MAX)
}

fn strip_digit_separators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let is_separator = c == ',' || c.is_whitespace();
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(char::is_ascii_digit);
        if is_separator && between_digits {
            continue;
        }
        out.push(c);
    }

    out
}
