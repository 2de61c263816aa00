//! Dataset statistics for observability and sanity checks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Observation;

/// Summary of one observation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Total dish reviews.
    pub reviews: usize,
    /// Distinct users.
    pub users: usize,
    /// Distinct dish keys.
    pub dishes: usize,
    /// Distinct restaurants.
    pub restaurants: usize,
    /// Distinct cuisine tags.
    pub cuisines: usize,
    /// Review counts per star, index 0 = 1 star.
    pub rating_histogram: [usize; 5],
    /// Mean star rating over all reviews.
    pub mean_rating: f32,
    /// Distinct (user, restaurant, visit) triples.
    pub visits: usize,
    /// Average dish reviews per visit.
    pub dishes_per_visit: f32,
}

impl DatasetStats {
    /// Summarize a batch of observations.
    #[must_use]
    pub fn from_observations(observations: &[Observation]) -> Self {
        let users: BTreeSet<_> = observations.iter().map(|o| o.user).collect();
        let dishes: BTreeSet<_> = observations.iter().map(|o| o.dish_key()).collect();
        let restaurants: BTreeSet<_> = observations
            .iter()
            .map(|o| o.restaurant_name.as_str())
            .collect();
        let cuisines: BTreeSet<_> = observations
            .iter()
            .filter_map(|o| o.cuisine.as_deref())
            .collect();
        let visits: BTreeSet<_> = observations
            .iter()
            .map(|o| (o.user, o.restaurant_name.as_str(), o.visit))
            .collect();

        let mut rating_histogram = [0usize; 5];
        let mut rating_sum = 0u32;
        for observation in observations {
            rating_histogram[usize::from(observation.rating.value()) - 1] += 1;
            rating_sum += u32::from(observation.rating.value());
        }
        let mean_rating = if observations.is_empty() {
            0.0
        } else {
            rating_sum as f32 / observations.len() as f32
        };
        let dishes_per_visit = if visits.is_empty() {
            0.0
        } else {
            observations.len() as f32 / visits.len() as f32
        };

        Self {
            reviews: observations.len(),
            users: users.len(),
            dishes: dishes.len(),
            restaurants: restaurants.len(),
            cuisines: cuisines.len(),
            rating_histogram,
            mean_rating,
            visits: visits.len(),
            dishes_per_visit,
        }
    }
}
