//! Error types for deck operations.

use thiserror::Error;

/// Result type for deck operations.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur outside the layout engine proper.
///
/// Layout and drawing never fail on well-formed input; these errors only
/// surface when loading settings or looking up cards by key.
#[derive(Debug, Error)]
pub enum CardError {
    /// Suit id does not name one of the four suits.
    #[error("Unknown suit: {0}")]
    UnknownSuit(String),

    /// Card not present in the deck.
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// Card selector could not be parsed.
    #[error("Invalid card selector: {0}")]
    InvalidSelector(String),

    /// Settings or deck serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
