//! Dishcover Recommendation Core
//!
//! Dish-level rating prediction and explanation: given historical
//! multi-visit dining ratings for a population of users, predicts
//! not-yet-tried dishes a target user will enjoy and explains why, via
//! user-user collaborative filtering with an optional restaurant-scoped
//! semantic dish-similarity boost.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`Observation`, `DishKey`, `Recommendation`, ...)
//! - Matrix construction (raw / mean-centered / zero-filled views)
//! - User-user cosine similarity
//! - Neighbor selection with restaurant-overlap filtering and fallback
//! - The semantic dish-similarity boost (via `dishcover-embeddings`)
//! - The prediction, explanation, and ranking pipeline
//! - Error types and result aliases
//!
//! # Pipeline
//!
//! One synchronous pass per request:
//! Build → Similarity → Select → Predict (+ Boost + Explain) → Rank.
//! Empty intermediate results short-circuit to an explicit empty outcome;
//! only malformed input is an error.
//!
//! # Example
//!
//! ```
//! use dishcover_core::config::RecommenderConfig;
//! use dishcover_core::pipeline::Recommender;
//! use dishcover_core::types::{Observation, RestaurantId, UserId};
//!
//! let observations = vec![
//!     Observation::new(UserId(1), "Laksa", "Straits Corner", RestaurantId(1), None, 5, 1).unwrap(),
//!     Observation::new(UserId(2), "Laksa", "Straits Corner", RestaurantId(1), None, 4, 1).unwrap(),
//! ];
//!
//! let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
//! let result = recommender.recommend(&observations, UserId(1)).unwrap();
//! // User 1 rated the only known dish: explicit empty outcome.
//! assert!(result.is_empty());
//! ```

pub mod boost;
pub mod config;
pub mod error;
pub mod matrix;
pub mod neighbors;
pub mod pipeline;
pub mod similarity;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use config::{BoostConfig, RecommenderConfig};
pub use error::{RecommendError, RecommendResult};
pub use pipeline::Recommender;
pub use types::{
    CommonItem, DishKey, EmptyReason, Observation, Rating, Recommendation, RecommendationSet,
    RestaurantId, Supporter, UserId,
};
