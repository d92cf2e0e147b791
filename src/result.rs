//! Result types for a feed scan.
//!
//! `PostRecord` is the unit of output and serializes to the field names of
//! the JSON export. `ExtractionRun` is everything one scan produced.

use serde::{Deserialize, Serialize};

/// One original post extracted from the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Normalized post text, lines separated by `\n`.
    pub content: String,

    /// Reaction count, 0 when not shown.
    pub reactions: u64,

    /// Comment count, 0 when not shown.
    pub comments: u64,

    /// View count, 0 when not shown.
    pub impressions: u64,

    /// Image URLs in document order.
    pub images: Vec<String>,

    /// Creation date decoded from the permalink, empty when unavailable.
    pub date_post: String,

    /// Canonical permalink, empty when the entry carries no activity URN.
    pub url: String,
}

/// Images of one kept post, waiting to be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBatch {
    /// Enumeration position of the post among all candidates (0-based).
    pub post_index: usize,

    /// Image URLs in document order.
    pub urls: Vec<String>,
}

/// Output and counters of one scan over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRun {
    /// Kept posts in encounter order.
    pub records: Vec<PostRecord>,

    /// Image exports to perform, one batch per kept post with images.
    pub image_batches: Vec<ImageBatch>,

    /// Candidate nodes visited.
    pub scanned: usize,

    /// Candidates skipped as reposts.
    pub reposts: usize,

    /// Candidates skipped for short content.
    pub too_short: usize,
}

impl ExtractionRun {
    /// Number of original posts kept.
    #[must_use]
    pub fn kept(&self) -> usize {
        self.records.len()
    }

    /// Total images across all batches.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.image_batches.iter().map(|b| b.urls.len()).sum()
    }
}
