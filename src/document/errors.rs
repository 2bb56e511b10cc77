//! Error types for document model operations

/// Failures raised while reading a single node or running a single query.
///
/// None of these abort an extraction; callers log them and move on to the
/// next node.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// A selector could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A node handle no longer refers to an element of this document
    #[error("Node {0} is not an element of this document")]
    DetachedNode(String),

    /// A link target could not be resolved against the document location
    #[error("Invalid href '{href}': {reason}")]
    InvalidHref { href: String, reason: String },
}
