//! The recommendation pipeline.
//!
//! One synchronous pass per request over a read-only observation slice:
//!
//! Build matrices → user similarity → neighbor selection → prediction
//! (+ boost + explanation) → ranking.
//!
//! Every empty intermediate result short-circuits to an explicit
//! [`RecommendationSet`] carrying an [`EmptyReason`], never an implicit
//! fault. Matrices and similarity are rebuilt fresh per request; nothing
//! is cached between requests except the caller-owned embedding cache.
//!
//! # Module Structure
//!
//! - `predict`: per-dish weighted prediction and supporter collection
//! - `explain`: common-taste items per (target, neighbor) pair
//! - `rank`: novelty-first ordering and truncation

mod explain;
mod predict;
mod rank;

use dishcover_embeddings::{EmbeddingCache, EmbeddingProvider};
use tracing::{info, instrument};

use crate::boost::DishBooster;
use crate::config::RecommenderConfig;
use crate::error::{RecommendError, RecommendResult};
use crate::matrix::MatrixSet;
use crate::neighbors::select_neighbors;
use crate::similarity::UserSimilarityMatrix;
use crate::types::{DishKey, EmptyReason, Observation, RecommendationSet, UserId};

/// Borrowed embedding collaborator handles.
struct EmbeddingHandles<'a> {
    provider: &'a dyn EmbeddingProvider,
    cache: &'a EmbeddingCache,
}

/// The rating-prediction and explanation engine.
///
/// # Example
///
/// ```
/// use dishcover_core::config::RecommenderConfig;
/// use dishcover_core::pipeline::Recommender;
/// use dishcover_core::types::{Observation, RestaurantId, UserId};
///
/// let observations = vec![
///     Observation::new(UserId(1), "Laksa", "Straits Corner", RestaurantId(1), None, 5, 1).unwrap(),
///     Observation::new(UserId(1), "Otah", "Straits Corner", RestaurantId(1), None, 3, 1).unwrap(),
///     Observation::new(UserId(2), "Laksa", "Straits Corner", RestaurantId(1), None, 5, 1).unwrap(),
///     Observation::new(UserId(2), "Otah", "Straits Corner", RestaurantId(1), None, 3, 1).unwrap(),
///     Observation::new(UserId(2), "Satay", "Straits Corner", RestaurantId(1), None, 5, 1).unwrap(),
/// ];
///
/// let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
/// let result = recommender.recommend(&observations, UserId(1)).unwrap();
/// assert_eq!(result.items[0].dish_name, "Satay");
/// ```
pub struct Recommender<'a> {
    config: RecommenderConfig,
    embeddings: Option<EmbeddingHandles<'a>>,
}

impl std::fmt::Debug for Recommender<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("config", &self.config)
            .field("embeddings", &self.embeddings.is_some())
            .finish()
    }
}

impl<'a> Recommender<'a> {
    /// Plain collaborative-filtering engine, no embedding collaborator.
    ///
    /// # Errors
    /// `RecommendError::InvalidConfig` for out-of-range parameters, or when
    /// the boost is enabled without an embedding collaborator; use
    /// [`Recommender::with_embeddings`] for that.
    pub fn new(config: RecommenderConfig) -> RecommendResult<Self> {
        config.validate()?;
        if config.boost.enabled {
            return Err(RecommendError::InvalidConfig(
                "boost enabled but no embedding provider/cache supplied".into(),
            ));
        }
        Ok(Self {
            config,
            embeddings: None,
        })
    }

    /// Engine wired to an embedding collaborator. The boost is applied only
    /// when `config.boost.enabled` is also set.
    ///
    /// The cache is owned by the caller: it outlives requests, so embedding
    /// lookups are shared across them.
    ///
    /// # Errors
    /// `RecommendError::InvalidConfig` for out-of-range parameters.
    pub fn with_embeddings(
        config: RecommenderConfig,
        provider: &'a dyn EmbeddingProvider,
        cache: &'a EmbeddingCache,
    ) -> RecommendResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            embeddings: Some(EmbeddingHandles { provider, cache }),
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Produce ranked recommendations for `target`.
    ///
    /// # Errors
    /// Only defects: `UnknownUser` for a target with zero prior ratings,
    /// `MissingDishMetadata` for an unresolvable dish key. Expected-empty
    /// outcomes come back as `Ok` with an [`EmptyReason`].
    #[instrument(skip(self, observations), fields(target = %target, observations = observations.len()))]
    pub fn recommend(
        &self,
        observations: &[Observation],
        target: UserId,
    ) -> RecommendResult<RecommendationSet> {
        let matrices = MatrixSet::from_observations(observations);

        // A zero-review target has an undefined row mean; centering it
        // would be meaningless, so the request is rejected up front.
        let target_mean = matrices
            .centered
            .row_mean(target)
            .ok_or(RecommendError::UnknownUser(target))?;

        let unrated: Vec<&DishKey> = matrices
            .raw
            .dishes()
            .iter()
            .filter(|dish| matrices.raw.get(target, dish).is_none())
            .collect();
        if unrated.is_empty() {
            info!(target = %target, "target has rated every known dish");
            return Ok(RecommendationSet::empty(EmptyReason::InputExhausted));
        }

        let similarity = UserSimilarityMatrix::compute(&matrices.filled);
        let neighbors = select_neighbors(
            &similarity,
            observations,
            target,
            self.config.neighbor_count,
        );
        if neighbors.is_empty() {
            info!(target = %target, "no neighbors with positive similarity");
            return Ok(RecommendationSet::empty(EmptyReason::NoNeighbors));
        }

        let candidates =
            self.predict_candidates(&matrices, observations, &neighbors, target, target_mean, &unrated)?;
        let items = rank::rank(candidates, self.config.top_n);

        if items.is_empty() {
            info!(target = %target, "no dish passed the weight/threshold/support filters");
            return Ok(RecommendationSet::empty(EmptyReason::NoQualifyingDish));
        }
        info!(target = %target, recommendations = items.len(), "recommendation request complete");
        Ok(RecommendationSet::with_items(items))
    }

    /// Booster over the caller's handles, when enabled and wired.
    fn booster(&self) -> Option<DishBooster<'_>> {
        if !self.config.boost.enabled {
            return None;
        }
        self.embeddings
            .as_ref()
            .map(|handles| DishBooster::new(handles.provider, handles.cache, self.config.boost))
    }
}
