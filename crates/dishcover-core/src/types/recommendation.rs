//! Output-side domain types.
//!
//! Everything here is a transient, per-request value built from flat and
//! nested primitives so a caller can serialize it directly.

use serde::{Deserialize, Serialize};

use super::observation::{DishKey, Rating, UserId};

/// One shared-taste connection between the target and a neighbor.
///
/// Wire `type` tags match the original service's JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommonItem {
    /// Both users liked the same dish at the same restaurant.
    #[serde(rename = "same_dish_same_restaurant")]
    SameDish {
        /// The shared dish.
        dish: String,
        /// The shared restaurant.
        restaurant: String,
        /// Target's star rating for the dish.
        user_rating: Rating,
        /// Neighbor's star rating for the dish.
        neighbor_rating: Rating,
    },
    /// The users liked different dishes at the same restaurant.
    #[serde(rename = "different_dish_same_restaurant")]
    SameRestaurant {
        /// Dish the target liked there.
        user_dish: String,
        /// Dish the neighbor liked there.
        neighbor_dish: String,
        /// The shared restaurant.
        restaurant: String,
    },
}

/// A neighbor whose rating justifies a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supporter {
    /// Neighbor user id.
    pub neighbor: UserId,
    /// Raw user-user similarity (un-boosted).
    pub similarity: f32,
    /// Neighbor's raw (visit-averaged) rating for the recommended dish.
    pub rating: f32,
    /// Deduplicated shared-taste connections for this (target, neighbor)
    /// pair.
    pub common_items: Vec<CommonItem>,
}

/// One recommended dish with its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Identity of the recommended dish.
    pub dish_key: DishKey,
    /// Dish name (from metadata).
    pub dish_name: String,
    /// Restaurant the dish belongs to.
    pub restaurant_name: String,
    /// Predicted rating, clamped to [1, 5].
    pub predicted_rating: f32,
    /// Whether the restaurant lies outside the target's visit history.
    pub new_restaurant: bool,
    /// Neighbors backing the prediction, in descending-similarity order.
    pub supporters: Vec<Supporter>,
}

/// Why a request produced no recommendations.
///
/// These are expected outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The target has rated every known dish.
    InputExhausted,
    /// No other user has positive similarity to the target.
    NoNeighbors,
    /// Every candidate failed the weight/threshold/support filters.
    NoQualifyingDish,
}

/// Final result of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    /// Ranked recommendations, at most top-N.
    pub items: Vec<Recommendation>,
    /// Set exactly when `items` is empty.
    pub empty_reason: Option<EmptyReason>,
}

impl RecommendationSet {
    /// A non-empty result.
    #[must_use]
    pub fn with_items(items: Vec<Recommendation>) -> Self {
        debug_assert!(!items.is_empty());
        Self {
            items,
            empty_reason: None,
        }
    }

    /// An explicit empty outcome.
    #[must_use]
    pub fn empty(reason: EmptyReason) -> Self {
        Self {
            items: Vec::new(),
            empty_reason: Some(reason),
        }
    }

    /// Whether the request produced no recommendations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// JSON rendering for process-boundary consumers.
    ///
    /// # Errors
    /// Propagates `serde_json` failures (not expected for these types).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
