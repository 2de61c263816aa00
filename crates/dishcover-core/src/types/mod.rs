//! Domain types for the recommendation core.
//!
//! - `observation`: input records and the identifiers they carry
//! - `recommendation`: output records (recommendations, supporters,
//!   common-taste items, empty-outcome reasons)

mod observation;
mod recommendation;

pub use observation::{DishKey, DishMeta, Observation, Rating, RestaurantId, UserId};
pub use recommendation::{
    CommonItem, EmptyReason, Recommendation, RecommendationSet, Supporter,
};
