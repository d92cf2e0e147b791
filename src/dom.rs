//! Read-only node capability over the feed document.
//!
//! The pipeline never touches `dom_query` directly. It sees a candidate
//! post and its sub-regions through [`PostNode`], which is implemented for
//! `dom_query::Selection` (real pages) and for [`FixtureNode`] (synthetic
//! trees built in tests without any markup parsing).

use std::collections::HashMap;

// Re-export core types for external use
pub use dom_query::{Document, Selection};

/// What the extraction pipeline needs from a node in the document tree.
pub trait PostNode: Sized {
    /// First descendant matching `selector`, if any.
    fn select_first(&self, selector: &str) -> Option<Self>;

    /// All descendants matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    /// Concatenated text content of the node and its descendants.
    fn text(&self) -> String;

    /// Serialized markup of the node's children.
    fn inner_markup(&self) -> String;

    /// Attribute value on the node itself.
    fn attr(&self, name: &str) -> Option<String>;
}

impl<'a> PostNode for Selection<'a> {
    // `try_select` returns None for an unparsable selector as well as for
    // no matches, so a bad configured selector degrades to "absent".
    fn select_first(&self, selector: &str) -> Option<Self> {
        self.try_select(selector).map(|sel| sel.first())
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        self.try_select(selector)
            .map(|sel| sel.iter().collect())
            .unwrap_or_default()
    }

    fn text(&self) -> String {
        Selection::text(self).to_string()
    }

    fn inner_markup(&self) -> String {
        self.inner_html().to_string()
    }

    fn attr(&self, name: &str) -> Option<String> {
        Selection::attr(self, name).map(|v| v.to_string())
    }
}

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Selection rooted at the document node, suitable as a scan root.
#[must_use]
pub fn document_root(doc: &Document) -> Selection<'_> {
    Selection::from(doc.root())
}

/// In-memory node with canned regions, for driving the pipeline without a page.
///
/// Regions are keyed by the exact selector string the pipeline will ask
/// for; any other selector is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureNode {
    text: String,
    markup: String,
    attrs: HashMap<String, String>,
    regions: HashMap<String, Vec<FixtureNode>>,
}

impl FixtureNode {
    /// Empty node with no text, markup or regions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content returned by [`PostNode::text`].
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the markup returned by [`PostNode::inner_markup`].
    #[must_use]
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = markup.into();
        self
    }

    /// Set an attribute on this node.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append a node answered for `selector`.
    #[must_use]
    pub fn with_region(mut self, selector: impl Into<String>, node: FixtureNode) -> Self {
        self.regions.entry(selector.into()).or_default().push(node);
        self
    }
}

impl PostNode for FixtureNode {
    fn select_first(&self, selector: &str) -> Option<Self> {
        self.regions.get(selector).and_then(|nodes| nodes.first()).cloned()
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        self.regions.get(selector).cloned().unwrap_or_default()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn inner_markup(&self) -> String {
        self.markup.clone()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs.get(name).cloned()
    }
}
