//! Per-dish prediction: boosted, weighted-average ratings plus supporter
//! collection.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::boost::{CandidateDish, LikedDish};
use crate::error::{RecommendError, RecommendResult};
use crate::matrix::MatrixSet;
use crate::neighbors::NeighborSet;
use crate::types::{CommonItem, DishKey, Observation, Recommendation, Supporter, UserId};

use super::{explain, Recommender};

/// Aggregated-rating threshold above which a neighbor becomes a supporter.
const SUPPORTER_MIN_RATING: f32 = 4.0;

/// A dish key resolved to displayable metadata.
struct ResolvedDish {
    dish_name: String,
    restaurant_name: String,
    cuisine: Option<String>,
}

impl<'a> Recommender<'a> {
    /// Score every unrated dish and keep those that qualify.
    ///
    /// For each dish, each neighbor with a rating contributes
    /// `similarity * boost` weight to a weighted average of centered
    /// ratings; un-centering adds the target's raw row mean back. Dishes
    /// with no rating weight are dropped; survivors must clear the
    /// configured threshold and carry at least one supporter.
    pub(crate) fn predict_candidates(
        &self,
        matrices: &MatrixSet,
        observations: &[Observation],
        neighbors: &NeighborSet,
        target: UserId,
        target_mean: f32,
        unrated: &[&DishKey],
    ) -> RecommendResult<Vec<Recommendation>> {
        let target_observations: Vec<&Observation> = observations
            .iter()
            .filter(|o| o.user == target)
            .collect();
        let target_restaurants: HashSet<&str> = target_observations
            .iter()
            .map(|o| o.restaurant_name.as_str())
            .collect();
        let target_liked: Vec<&Observation> = target_observations
            .iter()
            .copied()
            .filter(|o| o.rating.is_liked())
            .collect();
        let liked_by_restaurant = liked_dishes_by_restaurant(&target_liked);
        let common_by_neighbor = self.common_items_per_neighbor(observations, &target_liked, neighbors);

        let booster = self.booster();
        let mut candidates = Vec::new();

        for dish in unrated {
            let resolved = resolve_dish(matrices, observations, dish)?;

            let mut weighted_sum = 0.0f32;
            let mut weight_total = 0.0f32;
            let mut supporters = Vec::new();

            for neighbor in &neighbors.neighbors {
                let Some(raw_rating) = matrices.raw.get(neighbor.user, dish) else {
                    continue;
                };
                let centered_rating = matrices
                    .centered
                    .get(neighbor.user, dish)
                    .unwrap_or(0.0);

                let boost = match &booster {
                    Some(booster) => {
                        let liked = liked_by_restaurant
                            .get(resolved.restaurant_name.as_str())
                            .map_or(&[][..], Vec::as_slice);
                        booster
                            .evaluate(
                                &CandidateDish {
                                    dish: &resolved.dish_name,
                                    restaurant: &resolved.restaurant_name,
                                    cuisine: resolved.cuisine.as_deref(),
                                },
                                liked,
                            )
                            .boost
                    }
                    None => 1.0,
                };

                let weight = neighbor.similarity * boost;
                weighted_sum += weight * centered_rating;
                weight_total += weight;

                if raw_rating >= SUPPORTER_MIN_RATING {
                    supporters.push(Supporter {
                        neighbor: neighbor.user,
                        similarity: neighbor.similarity,
                        rating: raw_rating,
                        common_items: common_by_neighbor
                            .get(&neighbor.user)
                            .cloned()
                            .unwrap_or_default(),
                    });
                }
            }

            if weight_total <= 0.0 {
                // No neighbor rated this dish: no prediction possible.
                continue;
            }
            let predicted = (weighted_sum / weight_total + target_mean).clamp(1.0, 5.0);

            if predicted >= self.config.min_predicted_rating && !supporters.is_empty() {
                candidates.push(Recommendation {
                    dish_key: (*dish).clone(),
                    dish_name: resolved.dish_name,
                    restaurant_name: resolved.restaurant_name.clone(),
                    predicted_rating: predicted,
                    new_restaurant: !target_restaurants
                        .contains(resolved.restaurant_name.as_str()),
                    supporters,
                });
            } else {
                debug!(
                    dish = %dish,
                    predicted,
                    supporters = supporters.len(),
                    "candidate dropped by threshold/support filter"
                );
            }
        }

        debug!(
            scored = unrated.len(),
            qualified = candidates.len(),
            "prediction pass complete"
        );
        Ok(candidates)
    }

    /// Common-taste items per neighbor, computed once per request; they
    /// depend only on the (target, neighbor) pair, not on the dish.
    fn common_items_per_neighbor(
        &self,
        observations: &[Observation],
        target_liked: &[&Observation],
        neighbors: &NeighborSet,
    ) -> HashMap<UserId, Vec<CommonItem>> {
        neighbors
            .neighbors
            .iter()
            .map(|neighbor| {
                let neighbor_liked: Vec<&Observation> = observations
                    .iter()
                    .filter(|o| o.user == neighbor.user && o.rating.is_liked())
                    .collect();
                (
                    neighbor.user,
                    explain::common_items(target_liked, &neighbor_liked),
                )
            })
            .collect()
    }
}

/// The target's liked dishes grouped by restaurant, deduplicated by dish
/// name in input order (multi-visit duplicates add nothing to the boost
/// scan).
fn liked_dishes_by_restaurant<'o>(
    target_liked: &[&'o Observation],
) -> HashMap<&'o str, Vec<LikedDish>> {
    let mut map: HashMap<&str, Vec<LikedDish>> = HashMap::new();
    for observation in target_liked {
        let entry = map.entry(observation.restaurant_name.as_str()).or_default();
        if !entry.iter().any(|liked| liked.dish == observation.dish_name) {
            entry.push(LikedDish {
                dish: observation.dish_name.clone(),
                cuisine: observation.cuisine.clone(),
            });
        }
    }
    map
}

/// Resolve a dish key to metadata: the catalog first, else any observation
/// of the key. Cuisine falls back to the first observation that carries
/// one. A key with no metadata anywhere is a defect.
fn resolve_dish(
    matrices: &MatrixSet,
    observations: &[Observation],
    key: &DishKey,
) -> RecommendResult<ResolvedDish> {
    let observed_cuisine = || {
        observations
            .iter()
            .filter(|o| o.dish_name == key.dish && o.restaurant_name == key.restaurant)
            .find_map(|o| o.cuisine.clone())
    };

    if let Some(meta) = matrices.catalog.get(key) {
        return Ok(ResolvedDish {
            dish_name: meta.dish_name.clone(),
            restaurant_name: meta.restaurant_name.clone(),
            cuisine: meta.cuisine.clone().or_else(observed_cuisine),
        });
    }
    observations
        .iter()
        .find(|o| o.dish_name == key.dish && o.restaurant_name == key.restaurant)
        .map(|observation| ResolvedDish {
            dish_name: observation.dish_name.clone(),
            restaurant_name: observation.restaurant_name.clone(),
            cuisine: observation.cuisine.clone().or_else(observed_cuisine),
        })
        .ok_or_else(|| RecommendError::MissingDishMetadata(key.clone()))
}
