//! Restaurant-scoped semantic dish-similarity boost.
//!
//! A neighbor's vote counts for more when the target already likes dishes
//! close to the candidate *at the same restaurant*: the exact dish is the
//! strongest signal, a semantically similar dish (chicken vs prawn noodles)
//! a weaker one, an unrelated dish none. The boost multiplies the
//! neighbor's similarity weight and is clamped to `max_boost`; a missing
//! embedding degrades to no boost, never an error and never a penalty.

use dishcover_embeddings::similarity::cosine_similarity;
use dishcover_embeddings::{EmbeddingCache, EmbeddingProvider, EmbeddingRequest};
use tracing::trace;

use crate::config::BoostConfig;

/// Semantic similarity below this is "no meaningful boost". The raw value
/// is still reported to callers and traces.
pub const MIN_MEANINGFUL_SIMILARITY: f32 = 0.3;

/// The dish being scored for recommendation.
#[derive(Debug, Clone, Copy)]
pub struct CandidateDish<'a> {
    /// Dish name.
    pub dish: &'a str,
    /// Restaurant the dish belongs to.
    pub restaurant: &'a str,
    /// Cuisine tag, when known.
    pub cuisine: Option<&'a str>,
}

/// A dish the target rated >= 4 at the candidate's restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct LikedDish {
    /// Dish name.
    pub dish: String,
    /// Cuisine tag from the target's own observation, when known.
    pub cuisine: Option<String>,
}

/// Outcome of a boost evaluation, for tracing and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostOutcome {
    /// Highest dish similarity found (1.0 for an exact match).
    pub similarity: f32,
    /// Whether an exact (dish, restaurant) match short-circuited the scan.
    pub exact: bool,
    /// Final multiplicative boost, clamped to `max_boost`, >= 1.
    pub boost: f32,
}

impl BoostOutcome {
    /// The no-signal outcome: boost 1.0.
    #[must_use]
    pub fn none() -> Self {
        Self {
            similarity: 0.0,
            exact: false,
            boost: 1.0,
        }
    }
}

/// Computes dish-similarity boosts against a caller-owned cache and
/// provider.
pub struct DishBooster<'a> {
    provider: &'a dyn EmbeddingProvider,
    cache: &'a EmbeddingCache,
    config: BoostConfig,
}

impl<'a> DishBooster<'a> {
    /// Booster over the caller's provider and cache.
    #[must_use]
    pub fn new(
        provider: &'a dyn EmbeddingProvider,
        cache: &'a EmbeddingCache,
        config: BoostConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config,
        }
    }

    /// Evaluate the boost for one candidate against the target's liked
    /// dishes at the candidate's restaurant.
    ///
    /// The scan takes the maximum raw similarity across the liked dishes
    /// and short-circuits on the first exact match. The boost formula:
    ///
    /// - exact match: `min(max_boost, 1 + beta_same)`
    /// - similarity > 0.3: `min(max_boost, 1 + beta_similar * similarity)`
    /// - otherwise: 1.0
    #[must_use]
    pub fn evaluate(&self, candidate: &CandidateDish<'_>, liked: &[LikedDish]) -> BoostOutcome {
        let mut max_similarity = 0.0f32;
        let mut exact = false;

        for item in liked {
            if item.dish == candidate.dish {
                // Same dish at the same restaurant (the liked list is
                // already scoped to the candidate's restaurant).
                max_similarity = 1.0;
                exact = true;
                break;
            }
            let similarity = self.semantic_similarity(candidate, item);
            if similarity > max_similarity {
                max_similarity = similarity;
            }
        }

        let boost = if max_similarity >= 1.0 {
            self.config
                .max_boost
                .min(1.0 + self.config.beta_same)
        } else if max_similarity > MIN_MEANINGFUL_SIMILARITY {
            self.config
                .max_boost
                .min(1.0 + self.config.beta_similar * max_similarity)
        } else {
            1.0
        };

        trace!(
            dish = candidate.dish,
            restaurant = candidate.restaurant,
            similarity = max_similarity,
            exact,
            boost,
            "evaluated dish similarity boost"
        );
        BoostOutcome {
            similarity: max_similarity,
            exact,
            boost,
        }
    }

    /// Embedding cosine between the candidate and one liked dish at the
    /// same restaurant. Missing embeddings yield 0.0.
    fn semantic_similarity(&self, candidate: &CandidateDish<'_>, liked: &LikedDish) -> f32 {
        let candidate_request = EmbeddingRequest::new(
            candidate.dish,
            candidate.restaurant,
            candidate.cuisine.map(str::to_owned),
        );
        let liked_request = EmbeddingRequest::new(
            liked.dish.clone(),
            candidate.restaurant,
            liked.cuisine.clone(),
        );

        let Some(candidate_vector) = self.cache.get_or_fetch(&candidate_request, self.provider)
        else {
            return 0.0;
        };
        let Some(liked_vector) = self.cache.get_or_fetch(&liked_request, self.provider) else {
            return 0.0;
        };

        cosine_similarity(&candidate_vector, &liked_vector).unwrap_or(0.0)
    }
}
