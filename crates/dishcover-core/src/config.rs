//! Configuration for the recommendation pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, RecommendResult};

/// Parameters of the semantic dish-similarity boost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    /// Whether the boost is applied at all.
    /// Default: false (plain collaborative filtering).
    pub enabled: bool,
    /// Additive boost for the same dish at the same restaurant.
    /// Default: 1.0
    pub beta_same: f32,
    /// Additive boost factor for semantically similar dishes.
    /// Default: 0.5
    pub beta_similar: f32,
    /// Cap on the total multiplicative boost. Must be >= 1.
    /// Default: 2.0
    pub max_boost: f32,
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            beta_same: 1.0,
            beta_similar: 0.5,
            max_boost: 2.0,
        }
    }
}

/// Configuration for one recommendation request.
///
/// # Example
///
/// ```
/// use dishcover_core::config::RecommenderConfig;
///
/// let config = RecommenderConfig::default()
///     .with_neighbor_count(5)
///     .with_top_n(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Number of neighbors K considered per prediction.
    /// Default: 3
    pub neighbor_count: usize,
    /// Minimum predicted rating for a dish to qualify, in [1, 5].
    /// Default: 4.0
    pub min_predicted_rating: f32,
    /// Maximum number of recommendations returned.
    /// Default: 4
    pub top_n: usize,
    /// Semantic dish-similarity boost parameters.
    pub boost: BoostConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 3,
            min_predicted_rating: 4.0,
            top_n: 4,
            boost: BoostConfig::default(),
        }
    }
}

impl RecommenderConfig {
    /// Set the neighbor count K.
    #[inline]
    #[must_use]
    pub fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = k;
        self
    }

    /// Set the minimum predicted rating threshold.
    #[inline]
    #[must_use]
    pub fn with_min_predicted_rating(mut self, threshold: f32) -> Self {
        self.min_predicted_rating = threshold;
        self
    }

    /// Set the result-list cap.
    #[inline]
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Enable the boost with the given parameters.
    #[inline]
    #[must_use]
    pub fn with_boost(mut self, boost: BoostConfig) -> Self {
        self.boost = boost;
        self
    }

    /// Validate every parameter.
    ///
    /// # Errors
    /// `RecommendError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> RecommendResult<()> {
        if self.neighbor_count == 0 {
            return Err(RecommendError::InvalidConfig(
                "neighbor_count must be positive".into(),
            ));
        }
        if self.top_n == 0 {
            return Err(RecommendError::InvalidConfig(
                "top_n must be positive".into(),
            ));
        }
        if !(1.0..=5.0).contains(&self.min_predicted_rating) {
            return Err(RecommendError::InvalidConfig(format!(
                "min_predicted_rating {} outside [1, 5]",
                self.min_predicted_rating
            )));
        }
        if self.boost.beta_same <= 0.0 || !self.boost.beta_same.is_finite() {
            return Err(RecommendError::InvalidConfig(
                "beta_same must be a positive finite number".into(),
            ));
        }
        if self.boost.beta_similar <= 0.0 || !self.boost.beta_similar.is_finite() {
            return Err(RecommendError::InvalidConfig(
                "beta_similar must be a positive finite number".into(),
            ));
        }
        if self.boost.max_boost < 1.0 || !self.boost.max_boost.is_finite() {
            return Err(RecommendError::InvalidConfig(format!(
                "max_boost {} must be >= 1",
                self.boost.max_boost
            )));
        }
        Ok(())
    }
}
