//! Input-side domain types: identifiers, validated ratings, observations.

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, RecommendResult};

/// Opaque user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque restaurant identifier.
///
/// Carried on observations and metadata for downstream consumers; the
/// algorithm itself keys restaurants by display name, matching the dish-key
/// scheme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RestaurantId(pub u64);

/// Star rating, validated to the integer scale 1..=5.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate a raw star value.
    ///
    /// # Errors
    /// `RecommendError::InvalidRating` outside 1..=5.
    pub fn new(value: u8) -> RecommendResult<Self> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RecommendError::InvalidRating { value })
        }
    }

    /// The raw star value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The rating as a float, for matrix math.
    #[must_use]
    pub fn as_f32(self) -> f32 {
        f32::from(self.0)
    }

    /// Whether this rating counts as "liked" for supporters and
    /// common-taste explanations.
    #[must_use]
    pub fn is_liked(self) -> bool {
        self.0 >= 4
    }
}

impl TryFrom<u8> for Rating {
    type Error = RecommendError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Identity of a dish: unique per restaurant, never shared across
/// restaurants.
///
/// Ordered so matrix columns and candidate iteration are deterministic.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DishKey {
    /// Dish name.
    pub dish: String,
    /// Restaurant the dish belongs to.
    pub restaurant: String,
}

impl DishKey {
    /// Key for a (dish, restaurant) pair.
    pub fn new(dish: impl Into<String>, restaurant: impl Into<String>) -> Self {
        Self {
            dish: dish.into(),
            restaurant: restaurant.into(),
        }
    }
}

impl std::fmt::Display for DishKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.dish, self.restaurant)
    }
}

/// One rated dish from one restaurant visit.
///
/// Duplicate (user, dish key) observations across visits are legal input;
/// the matrix builder averages them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Reviewer.
    pub user: UserId,
    /// Dish name.
    pub dish_name: String,
    /// Restaurant display name.
    pub restaurant_name: String,
    /// Restaurant identifier.
    pub restaurant_id: RestaurantId,
    /// Cuisine tag, when known.
    pub cuisine: Option<String>,
    /// Validated star rating.
    pub rating: Rating,
    /// Visit sequence number for the (user, restaurant) pair.
    pub visit: u32,
}

impl Observation {
    /// Build an observation, validating the raw rating.
    ///
    /// # Errors
    /// `RecommendError::InvalidRating` when `rating` is outside 1..=5.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user: UserId,
        dish_name: impl Into<String>,
        restaurant_name: impl Into<String>,
        restaurant_id: RestaurantId,
        cuisine: Option<String>,
        rating: u8,
        visit: u32,
    ) -> RecommendResult<Self> {
        Ok(Self {
            user,
            dish_name: dish_name.into(),
            restaurant_name: restaurant_name.into(),
            restaurant_id,
            cuisine,
            rating: Rating::new(rating)?,
            visit,
        })
    }

    /// The dish key this observation contributes to.
    #[must_use]
    pub fn dish_key(&self) -> DishKey {
        DishKey::new(self.dish_name.clone(), self.restaurant_name.clone())
    }
}

/// Metadata for one dish key.
///
/// When the same key appears in multiple observations, the first
/// occurrence in input order is the representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishMeta {
    /// Dish name.
    pub dish_name: String,
    /// Restaurant display name.
    pub restaurant_name: String,
    /// Restaurant identifier.
    pub restaurant_id: RestaurantId,
    /// Cuisine tag, when known.
    pub cuisine: Option<String>,
}
