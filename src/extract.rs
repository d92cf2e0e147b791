//! Per-node post extraction.
//!
//! Turns one candidate feed node into a [`PostRecord`], or says why it was
//! skipped. Missing sub-regions are never errors: they read as empty text
//! or zero counts.

use tracing::debug;
use url::Url;

use crate::assets::collect_images;
use crate::dom::PostNode;
use crate::numbers::parse_count;
use crate::options::Options;
use crate::patterns::{ACTIVITY_URN, PERMALINK_BASE};
use crate::post_id::{date_for_permalink, extract_identifier, DisplayZone};
use crate::repost::is_repost;
use crate::result::PostRecord;
use crate::text::{normalize, strip_hashtag_word};
use crate::url_utils::parse_base;

/// Outcome of extracting one candidate node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// An original post with enough content.
    Post(PostRecord),

    /// The node carries a repost marker.
    Repost,

    /// Normalized content is shorter than `min_content_len`.
    TooShort {
        /// Content length in characters after normalization.
        len: usize,
    },
}

impl Extraction {
    /// The record, if the node was kept.
    #[must_use]
    pub fn into_record(self) -> Option<PostRecord> {
        match self {
            Self::Post(record) => Some(record),
            Self::Repost | Self::TooShort { .. } => None,
        }
    }
}

/// Extracts records from candidate nodes with a fixed configuration.
#[derive(Debug, Clone)]
pub struct PostExtractor<'a> {
    options: &'a Options,
    zone: DisplayZone,
    base: Option<Url>,
}

impl<'a> PostExtractor<'a> {
    /// Extractor rendering dates in `zone`.
    #[must_use]
    pub fn new(options: &'a Options, zone: DisplayZone) -> Self {
        let base = options.base_url.as_deref().and_then(parse_base);
        Self { options, zone, base }
    }

    /// Extract the node at scan position `index`.
    ///
    /// Steps short-circuit: a repost is rejected before any text is read,
    /// and short content before counts, permalink and images.
    pub fn extract<N: PostNode>(&self, node: &N, index: usize) -> Extraction {
        let selectors = &self.options.selectors;

        if is_repost(node, &selectors.repost_markers) {
            debug!(index, "skipping repost");
            return Extraction::Repost;
        }

        let body = node.select_first(&selectors.content);
        let content = strip_hashtag_word(&normalize(body.as_ref()));

        // Threshold applies to the stripped text.
        let len = content_len(&content);
        if len == 0 || len < self.options.min_content_len {
            debug!(index, len, "skipping short post");
            return Extraction::TooShort { len };
        }

        let reactions = parse_count(&normalize(node.select_first(&selectors.reactions).as_ref()));
        let comments = parse_count(&normalize(node.select_first(&selectors.comments).as_ref()));
        let impressions = node
            .select_first(&selectors.impressions)
            .map_or(0, |views| parse_count(&views.text()));

        let url = permalink(node);
        let date_post = date_for_permalink(&url, &self.zone);
        let images = collect_images(node, &selectors.images, self.base.as_ref());

        Extraction::Post(PostRecord {
            content,
            reactions,
            comments,
            impressions,
            images,
            date_post,
            url,
        })
    }
}

/// Length of `text` in UTF-16 code units, the unit the feed's own page
/// script measured posts in. Characters outside the Basic Multilingual
/// Plane (most emoji) count twice.
#[must_use]
pub fn content_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Canonical permalink from the node's activity URN, or empty.
///
/// The URN is looked for in the node's inner markup first, then in its own
/// `data-urn` / `data-id` attributes. A URN without a 19-digit post
/// identifier yields no permalink.
#[must_use]
pub fn permalink<N: PostNode>(node: &N) -> String {
    let markup = node.inner_markup();
    let urn = ACTIVITY_URN
        .find(&markup)
        .map(|m| m.as_str().trim_matches('"').to_string())
        .or_else(|| {
            ["data-urn", "data-id"]
                .iter()
                .filter_map(|attr| node.attr(attr))
                .find(|value| value.starts_with("urn:li:activity:"))
        });

    urn.map(|urn| format!("{PERMALINK_BASE}{urn}"))
        .filter(|url| extract_identifier(url).is_some())
        .unwrap_or_default()
}
