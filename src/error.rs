//! Error types for rendering and PDF composition

use thiserror::Error;

/// Result type alias for render and compose operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a diagram or assembling the PDF
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch or configure the browser
    #[error("Renderer initialization failed: {0}")]
    Initialization(String),

    /// Failed to load the diagram page or to find the rendered diagram in it
    #[error("Failed to load diagram: {0}")]
    Load(String),

    /// Failed to capture a screenshot of the rendered diagram
    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    /// Screenshot bytes were not a decodable image
    #[error("Failed to decode screenshot: {0}")]
    Decode(String),

    /// Zero or otherwise unusable image/page dimensions
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// PDF assembly failed
    #[error("PDF composition failed: {0}")]
    Compose(String),
}
