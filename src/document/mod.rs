//! Read-only view over a rendered document tree.
//!
//! The readable-view pipeline never touches a concrete DOM. Every stage is
//! generic over [`DocumentModel`], which exposes just the capabilities the
//! extraction heuristics need:
//! - CSS-selector queries, document-wide or scoped to a node
//! - parent / ancestor / sibling / child traversal
//! - document-order comparison
//! - text, attributes and outer markup
//! - rendered box size and computed visibility
//!
//! [`HtmlDocument`] is the `scraper`-backed implementation used by the CLI and tests.

pub mod errors;
pub mod html_document;
pub mod style;

pub use errors::DocumentError;
pub use html_document::HtmlDocument;

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;
use url::Url;

/// Rendered box size of a node, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

/// Capability surface over a source document.
///
/// Nodes are opaque identity handles: two handles compare equal exactly when
/// they refer to the same element, which is what the duplicate-suppression
/// bookkeeping relies on.
pub trait DocumentModel {
    type Node: Copy + Eq + Hash + Debug;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, DocumentError>;

    /// Descendants of `scope` (excluding `scope`) matching `selector`, in document order.
    fn query_all_within(
        &self,
        scope: Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, DocumentError>;

    /// First element matching `selector`.
    fn query_first(&self, selector: &str) -> Result<Option<Self::Node>, DocumentError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Whether `node` itself matches `selector`.
    fn matches(&self, node: Self::Node, selector: &str) -> Result<bool, DocumentError>;

    /// Parent element, if any.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Nearest ancestor-or-self matching `selector`.
    fn closest(&self, node: Self::Node, selector: &str) -> Result<Option<Self::Node>, DocumentError> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.matches(candidate, selector)? {
                return Ok(Some(candidate));
            }
            current = self.parent(candidate);
        }
        Ok(None)
    }

    /// Element children in order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// All element descendants in document order (excluding `node`).
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Next sibling that is an element.
    fn next_element_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Relative document order of two nodes.
    fn compare_document_order(&self, a: Self::Node, b: Self::Node) -> Ordering;

    /// Lower-case tag name.
    fn tag_name(&self, node: Self::Node) -> &str;

    /// Raw attribute value.
    fn attr(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Raw `class` attribute, empty when absent.
    fn class_name(&self, node: Self::Node) -> &str {
        self.attr(node, "class").unwrap_or("")
    }

    /// Concatenated text of the node and all its descendants.
    fn text_content(&self, node: Self::Node) -> String;

    /// Serialized markup of the node including itself.
    fn outer_html(&self, node: Self::Node) -> String;

    /// Rendered box size, `None` when the document carries no layout for the node.
    fn box_size(&self, node: Self::Node) -> Option<BoxSize>;

    /// Computed visibility: displayed, not `visibility: hidden`, not fully transparent.
    fn is_visible(&self, node: Self::Node) -> bool;

    /// Document title, empty when absent.
    fn title(&self) -> String;

    /// Location the document was loaded from, used to resolve and classify links.
    fn base_url(&self) -> Option<&Url>;
}
