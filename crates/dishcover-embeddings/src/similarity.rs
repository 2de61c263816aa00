//! Dense vector similarity primitives.
//!
//! Shared by the dish-similarity boost (embedding vectors) and by the
//! collaborative-filtering core (mean-centered, zero-filled rating rows).
//!
//! Zero-magnitude input is not an error here: a vector with no signal has
//! cosine similarity 0.0 to everything, including itself. This is load-bearing
//! for rating rows that center to the zero vector (a user whose ratings are
//! all identical).

use crate::error::{EmbeddingError, EmbeddingResult};

/// Calculate L2 norm (magnitude) of a vector.
#[inline]
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Calculate dot product between two dense vectors.
///
/// # Errors
/// - `EmbeddingError::EmptyVector` if either vector is empty
/// - `EmbeddingError::DimensionMismatch` if vectors have different lengths
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> EmbeddingResult<f32> {
    if a.is_empty() || b.is_empty() {
        return Err(EmbeddingError::EmptyVector);
    }
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Calculate cosine similarity between two dense vectors.
///
/// Returns a value in [-1, 1]. A zero-magnitude vector on either side
/// yields `Ok(0.0)` rather than an error.
///
/// # Errors
/// - `EmbeddingError::EmptyVector` if either vector is empty
/// - `EmbeddingError::DimensionMismatch` if vectors have different lengths
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> EmbeddingResult<f32> {
    let dot = dot_product(a, b)?;
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return Ok(0.0);
    }
    Ok(dot / (norm_a * norm_b))
}
