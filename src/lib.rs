//! # rs-feedposts
//!
//! Extracts original posts from a saved social-feed page.
//!
//! Each feed entry is checked for repost markers, its body is normalized to
//! multi-line text, engagement counters are parsed from their human
//! formatting ("1,234"), and the creation date is decoded from the 19-digit
//! activity identifier in the permalink. The result is a JSON array plus
//! one downloaded file per post image.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_feedposts::{scan_html, Options};
//!
//! let html = r#"<html><body>
//!   <div class="feed-shared-update-v2" data-urn="urn:li:activity:7130316800000012345">
//!     <div class="tvm-parent-container"><span>A post body long enough to keep.<br>
//!       It talks about shipping software, parsing markup and counting reactions.</span></div>
//!     <span class="social-details-social-counts__reactions-count">1,024</span>
//!   </div>
//! </body></html>"#;
//!
//! let run = scan_html(html)?;
//! assert_eq!(run.records.len(), 1);
//! assert_eq!(run.records[0].reactions, 1024);
//! # Ok::<(), rs_feedposts::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - [`scanner`]: enumerates feed items and drives extraction
//! - [`repost`]: structural repost check
//! - [`extract`]: one node to one [`PostRecord`]
//! - [`text`], [`numbers`], [`post_id`]: normalization helpers
//! - [`assets`]: image collection and concurrent export
//! - [`sink`]: JSON export

mod error;
mod options;
mod patterns;
mod result;

/// Read-only node capability over the document (`dom_query` and fixtures).
pub mod dom;

/// Markup fragment to multi-line text.
pub mod text;

/// Human-formatted count parsing.
pub mod numbers;

/// Post identifier and creation-date decoding.
pub mod post_id;

/// Repost detection.
pub mod repost;

/// Per-node post extraction.
pub mod extract;

/// Feed enumeration.
pub mod scanner;

/// Post image collection and export.
pub mod assets;

/// JSON export.
pub mod sink;

/// End-to-end run: scan, export images, write JSON.
pub mod run;

/// Character encoding detection for saved pages.
pub mod encoding;

/// URL helpers for image sources.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{Options, Selectors};
pub use post_id::DisplayZone;
pub use result::{ExtractionRun, ImageBatch, PostRecord};
pub use run::{harvest, HarvestReport};

/// Scans an HTML page using default options and the local timezone.
///
/// # Example
///
/// ```rust
/// use rs_feedposts::scan_html;
///
/// let run = scan_html("<html><body><p>No feed here</p></body></html>")?;
/// assert!(run.records.is_empty());
/// # Ok::<(), rs_feedposts::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn scan_html(html: &str) -> Result<ExtractionRun> {
    scan_html_with_options(html, &Options::default())
}

/// Scans an HTML page with custom options and the local timezone.
///
/// # Errors
///
/// Returns `Error::InvalidSelector` or `Error::Config` when `options` fail
/// validation. Problems inside individual posts never produce an error.
pub fn scan_html_with_options(html: &str, options: &Options) -> Result<ExtractionRun> {
    options.validate()?;
    let doc = dom::parse(html);
    Ok(scan_document(&doc, options, DisplayZone::local()))
}

/// Scans raw page bytes, decoding them by their declared charset first.
///
/// # Errors
///
/// Same as [`scan_html_with_options`].
pub fn scan_bytes_with_options(html: &[u8], options: &Options) -> Result<ExtractionRun> {
    let text = encoding::decode_page(html);
    scan_html_with_options(&text, options)
}

/// Scans an already parsed document, rendering dates in `zone`.
///
/// Options are not validated here; unparsable selectors simply match
/// nothing.
#[must_use]
pub fn scan_document(doc: &dom::Document, options: &Options, zone: DisplayZone) -> ExtractionRun {
    scanner::scan(&dom::document_root(doc), options, zone)
}
