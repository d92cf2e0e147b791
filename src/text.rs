//! Markup fragment to plain multi-line text.
//!
//! Line breaks in post bodies are `<br>` elements, which contribute no text
//! of their own. They are turned into `\n` before any text is read so that
//! the lines on either side stay separate. The rewritten markup is parsed
//! into a scratch document; the source tree is never modified.

use crate::dom::{self, PostNode, Selection};
use crate::patterns::{BLOCK_ELEMENT_SELECTOR, HASHTAG_WORD, LINE_BREAK_TAG, LINE_ELEMENT_SELECTOR};

/// Convert an optional node into clean multi-line text.
///
/// Returns an empty string when the node is absent or holds only
/// whitespace and line breaks.
#[must_use]
pub fn normalize<N: PostNode>(node: Option<&N>) -> String {
    node.map_or_else(String::new, |n| normalize_markup(&n.inner_markup()))
}

/// Normalize a serialized markup fragment.
///
/// Every `p`, `span` or `div` without a nested `p` or `div` becomes one
/// line (trimmed, empties dropped), in document order. Elements holding
/// such blocks are descended into; their loose text is dropped. A fragment
/// without any top-level line element is returned as one trimmed block.
#[must_use]
pub fn normalize_markup(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    let with_breaks = LINE_BREAK_TAG.replace_all(markup, "\n");
    let scratch = dom::parse(&with_breaks);
    let body = scratch.select("body");

    let has_lines = body.children().iter().any(|child| child.is(LINE_ELEMENT_SELECTOR));
    if !has_lines {
        return body.text().trim().to_string();
    }

    let mut lines = Vec::new();
    collect_lines(&body, &mut lines);
    lines.join("\n")
}

fn collect_lines(parent: &Selection<'_>, lines: &mut Vec<String>) {
    for child in parent.children().iter() {
        if !child.is(LINE_ELEMENT_SELECTOR) {
            continue;
        }
        if child.try_select(BLOCK_ELEMENT_SELECTOR).is_some() {
            collect_lines(&child, lines);
            continue;
        }

        let line = child.text().trim().to_string();
        if !line.is_empty() {
            lines.push(line);
        }
    }
}

/// Remove every whole-word "hashtag" (any case) from `text`.
#[must_use]
pub fn strip_hashtag_word(text: &str) -> String {
    HASHTAG_WORD.replace_all(text, "").into_owned()
}
