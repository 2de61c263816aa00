//! Error types for the embedding collaborator.

use thiserror::Error;

/// Result alias for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Errors from embedding lookup and dense vector math.
///
/// Callers in the recommendation core must treat every variant as
/// non-fatal: a failed embedding lookup degrades to "no boost" and is
/// never propagated out of a prediction request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmbeddingError {
    /// The provider has no vector for the requested dish.
    #[error("no embedding available for '{key}'")]
    NotFound {
        /// Cache-key rendering of the (dish, restaurant) pair.
        key: String,
    },

    /// The embedding backend failed (network, quota, model error).
    #[error("embedding backend failure: {reason}")]
    Backend {
        /// Detailed reason for the failure.
        reason: String,
    },

    /// Dimension mismatch between vectors.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension (from first vector)
        expected: usize,
        /// Actual dimension (from second vector)
        actual: usize,
    },

    /// Empty vector provided.
    #[error("empty vector provided")]
    EmptyVector,
}
