//! Configuration options for scanning and export.
//!
//! `Options` controls thresholds and output, `Selectors` holds the
//! structural signatures of the host page. Both deserialize from TOML with
//! every field optional, so a config file only names what it changes.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::repost::DEFAULT_REPOST_MARKERS;

/// CSS selectors locating feed items and their regions.
///
/// Feed markup uses generated class names that change without notice;
/// override these from a config file when a scan suddenly finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// One element per feed entry.
    ///
    /// Default: `".feed-shared-update-v2"`
    pub feed_item: String,

    /// Post body inside a feed entry.
    ///
    /// Default: `".tvm-parent-container"`
    pub content: String,

    /// Reaction counter.
    ///
    /// Default: `".social-details-social-counts__reactions-count"`
    pub reactions: String,

    /// Comment counter.
    ///
    /// Default: `".social-details-social-counts__comments"`
    pub comments: String,

    /// View/impression counter (own posts only).
    ///
    /// Default: `".ca-entry-point__num-views"`
    pub impressions: String,

    /// Post images, excluding avatars and logos.
    pub images: String,

    /// Any match marks the entry as a repost.
    pub repost_markers: Vec<String>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            feed_item: ".feed-shared-update-v2".to_string(),
            content: ".tvm-parent-container".to_string(),
            reactions: ".social-details-social-counts__reactions-count".to_string(),
            comments: ".social-details-social-counts__comments".to_string(),
            impressions: ".ca-entry-point__num-views".to_string(),
            images: ".update-components-image__container .ivm-image-view-model .ivm-view-attr__img-wrapper img"
                .to_string(),
            repost_markers: DEFAULT_REPOST_MARKERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Selectors {
    fn named(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("feed_item", self.feed_item.as_str()),
            ("content", self.content.as_str()),
            ("reactions", self.reactions.as_str()),
            ("comments", self.comments.as_str()),
            ("impressions", self.impressions.as_str()),
            ("images", self.images.as_str()),
        ]
        .into_iter()
        .chain(self.repost_markers.iter().map(|m| ("repost_markers", m.as_str())))
    }
}

/// Configuration options for a scan and its exports.
///
/// # Example
///
/// ```rust
/// use rs_feedposts::Options;
///
/// let options = Options {
///     min_content_len: 40,
///     download_images: false,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Structural signatures of the host page.
    pub selectors: Selectors,

    /// Posts whose normalized content is shorter than this are dropped as
    /// noise. Measured in UTF-16 code units, so most emoji count as two.
    ///
    /// Default: `100`
    pub min_content_len: usize,

    /// Fetch and save post images.
    ///
    /// Default: `true`
    pub download_images: bool,

    /// Directory receiving the JSON export and the image tree.
    ///
    /// Default: `"."`
    pub output_dir: PathBuf,

    /// Base URL for resolving relative image `src` values.
    ///
    /// Pages saved from the browser usually keep absolute URLs, so this is
    /// rarely needed.
    ///
    /// Default: `None`
    pub base_url: Option<String>,

    /// Upper bound on simultaneous image fetches.
    ///
    /// Default: `8`
    pub max_concurrent_downloads: usize,

    /// TCP connect timeout for image fetches, in seconds.
    ///
    /// Default: `30`
    pub connect_timeout_secs: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            min_content_len: 100,
            download_images: true,
            output_dir: PathBuf::from("."),
            base_url: None,
            max_concurrent_downloads: 8,
            connect_timeout_secs: 30,
        }
    }
}

impl Options {
    /// Parse options from TOML text. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for malformed TOML or mistyped fields.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` when the file cannot be read and `Error::Config`
    /// when it does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check that every selector parses and limits are usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSelector` naming the first bad selector, or
    /// `Error::Config` for a zero download limit.
    pub fn validate(&self) -> Result<()> {
        for (name, selector) in self.selectors.named() {
            if selector.trim().is_empty() || dom_query::Matcher::new(selector).is_err() {
                return Err(Error::InvalidSelector {
                    name,
                    selector: selector.to_string(),
                });
            }
        }

        if self.max_concurrent_downloads == 0 {
            return Err(Error::Config(
                "max_concurrent_downloads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = Options::default();

        assert_eq!(opts.min_content_len, 100);
        assert!(opts.download_images);
        assert_eq!(opts.output_dir, PathBuf::from("."));
        assert!(opts.base_url.is_none());
        assert_eq!(opts.max_concurrent_downloads, 8);
        assert_eq!(opts.connect_timeout_secs, 30);
        assert_eq!(opts.selectors.repost_markers.len(), 4);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let opts = Options::from_toml_str(
            r#"
            min_content_len = 20

            [selectors]
            feed_item = ".my-feed-item"
            "#,
        );

        let opts = match opts {
            Ok(o) => o,
            Err(e) => panic!("expected Ok(_), got {e}"),
        };
        assert_eq!(opts.min_content_len, 20);
        assert_eq!(opts.selectors.feed_item, ".my-feed-item");
        assert_eq!(opts.selectors.content, Selectors::default().content);
        assert!(opts.download_images);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = Options::from_toml_str("min_content_len = \"long\"");
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn invalid_selector_is_named() {
        let opts = Options {
            selectors: Selectors {
                comments: "div[".to_string(),
                ..Selectors::default()
            },
            ..Options::default()
        };

        match opts.validate() {
            Err(Error::InvalidSelector { name, selector }) => {
                assert_eq!(name, "comments");
                assert_eq!(selector, "div[");
            }
            other => panic!("expected InvalidSelector, got {other:?}"),
        }
    }

    #[test]
    fn empty_repost_marker_is_rejected() {
        let mut opts = Options::default();
        opts.selectors.repost_markers.push("  ".to_string());

        assert!(matches!(
            opts.validate(),
            Err(Error::InvalidSelector { name: "repost_markers", .. })
        ));
    }

    #[test]
    fn zero_download_limit_is_rejected() {
        let opts = Options {
            max_concurrent_downloads: 0,
            ..Options::default()
        };
        assert!(matches!(opts.validate(), Err(Error::Config(_))));
    }
}
