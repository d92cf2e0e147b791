//! Repost detection.
//!
//! A reshared entry carries a header describing who reshared it. The
//! check is purely structural: the node contains an element matching one
//! of the configured marker selectors. Text is never inspected.

use crate::dom::PostNode;

/// Default markers for reshared entries, in the order they are checked.
pub const DEFAULT_REPOST_MARKERS: [&str; 4] = [
    // "reposted this" actor line
    ".feed-shared-actor__description",
    ".feed-shared-actor__sub-description",
    // "shared a post" blocks
    ".feed-shared-reshared-text",
    ".update-components-header__text-view",
];

/// True if `node` contains any of `markers`.
#[must_use]
pub fn is_repost<N: PostNode, S: AsRef<str>>(node: &N, markers: &[S]) -> bool {
    markers
        .iter()
        .any(|marker| node.select_first(marker.as_ref()).is_some())
}
