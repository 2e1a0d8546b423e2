//! Error types for board operations.

use thiserror::Error;

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur in board operations.
///
/// The engine absorbs most failure conditions as silent no-ops; these
/// variants cover the few places where a caller can meaningfully react.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document blob with an unrecognized type tag or shape.
    #[error("Unrecognized document: {0}")]
    InvalidDocument(String),

    /// An element id that is not a valid UUID.
    #[error("Invalid element id: {0}")]
    InvalidId(#[from] uuid::Error),
}
