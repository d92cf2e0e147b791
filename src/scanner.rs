//! Feed enumeration.
//!
//! Visits every node matching the feed-item selector in document order and
//! runs the extractor over it. The scan index is the enumeration position,
//! so rejected candidates still consume one; it only feeds image file
//! names.

use tracing::{debug, info};

use crate::dom::PostNode;
use crate::extract::{Extraction, PostExtractor};
use crate::options::Options;
use crate::post_id::DisplayZone;
use crate::result::{ExtractionRun, ImageBatch};

/// Scan all feed items under `root`.
#[must_use]
pub fn scan<N: PostNode>(root: &N, options: &Options, zone: DisplayZone) -> ExtractionRun {
    let extractor = PostExtractor::new(options, zone);
    let mut run = ExtractionRun::default();

    for (index, node) in root.select_all(&options.selectors.feed_item).iter().enumerate() {
        run.scanned += 1;

        match extractor.extract(node, index) {
            Extraction::Post(record) => {
                if !record.images.is_empty() {
                    run.image_batches.push(ImageBatch {
                        post_index: index,
                        urls: record.images.clone(),
                    });
                }
                run.records.push(record);
            }
            Extraction::Repost => run.reposts += 1,
            Extraction::TooShort { .. } => run.too_short += 1,
        }
    }

    if run.scanned == 0 {
        debug!(selector = %options.selectors.feed_item, "no feed items matched");
    }
    info!(
        scanned = run.scanned,
        reposts = run.reposts,
        too_short = run.too_short,
        "Found {} original posts",
        run.kept()
    );

    run
}
