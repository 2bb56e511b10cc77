//! Error types for the readable view controller

/// Failures reported back over the control protocol.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The page could not be translated; the view stays on the original page
    #[error("Failed to build readable view: {0}")]
    Translation(String),

    /// A control message could not be decoded
    #[error("Invalid control request: {0}")]
    InvalidRequest(String),
}
