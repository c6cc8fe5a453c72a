//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rasterizing or exporting cards.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Resource loading or decoding failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// Encoding a scene to an output format failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Deck export was cancelled between cards.
    #[error("Export cancelled after {0} cards")]
    Cancelled(usize),

    /// Card lookup or settings failure from the layout engine.
    #[error(transparent)]
    Card(#[from] deck_core::CardError),

    /// Filesystem failure while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
