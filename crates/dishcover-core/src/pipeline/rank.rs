//! Candidate ordering and truncation.

use crate::types::Recommendation;

/// Order candidates novelty-first, then by predicted rating, and keep the
/// top N.
///
/// Novelty dominates: a dish at a restaurant the target has never visited
/// outranks a higher-scoring dish at a familiar one. The sort is stable,
/// so ties keep deterministic dish-key order from the prediction pass.
pub(crate) fn rank(mut candidates: Vec<Recommendation>, top_n: usize) -> Vec<Recommendation> {
    candidates.sort_by(|a, b| {
        b.new_restaurant.cmp(&a.new_restaurant).then(
            b.predicted_rating
                .partial_cmp(&a.predicted_rating)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });
    candidates.truncate(top_n);
    candidates
}
