//! Neighbor selection: who gets a vote on the target's predictions.
//!
//! Selection is two-staged. Similarity alone over-selects users who merely
//! share a rating scale, so candidates must also share at least one visited
//! restaurant with the target. When nobody passes the overlap filter the
//! selector falls back to raw similarity rather than returning nothing;
//! the weaker criterion is flagged on the result and logged.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::similarity::UserSimilarityMatrix;
use crate::types::{Observation, UserId};

/// How many similarity-ranked candidates enter the overlap filter,
/// as a multiple of K.
const CANDIDATE_POOL_FACTOR: usize = 3;

/// Which criterion produced the neighbor set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Neighbors share at least one visited restaurant with the target.
    RestaurantOverlap,
    /// Overlap filter matched nobody; raw top-K by similarity.
    SimilarityFallback,
}

/// One selected neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Neighbor user id.
    pub user: UserId,
    /// Raw similarity to the target.
    pub similarity: f32,
}

/// Selected neighbors in descending-similarity order, plus the criterion
/// that produced them.
#[derive(Debug)]
pub struct NeighborSet {
    /// Neighbors, strongest first.
    pub neighbors: Vec<Neighbor>,
    /// Criterion that produced this set.
    pub mode: SelectionMode,
}

impl NeighborSet {
    /// Whether no neighbor qualified even under the fallback.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// Select up to `k` neighbors for `target`.
///
/// Candidates are every other user with similarity > 0, strongest first
/// (user id breaks ties deterministically), capped at 3K before the
/// restaurant-overlap filter. If no candidate shares a restaurant with the
/// target, the raw top-K by similarity is used instead and the fallback is
/// flagged.
#[must_use]
pub fn select_neighbors(
    similarity: &UserSimilarityMatrix,
    observations: &[Observation],
    target: UserId,
    k: usize,
) -> NeighborSet {
    let mut positive: Vec<Neighbor> = similarity
        .similarities_from(target)
        .into_iter()
        .filter(|(_, s)| *s > 0.0)
        .map(|(user, similarity)| Neighbor { user, similarity })
        .collect();
    positive.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.user.cmp(&b.user))
    });

    let restaurants_by_user = visited_restaurants(observations);
    let empty = HashSet::new();
    let target_restaurants = restaurants_by_user.get(&target).unwrap_or(&empty);

    let with_overlap: Vec<Neighbor> = positive
        .iter()
        .take(k.saturating_mul(CANDIDATE_POOL_FACTOR))
        .filter(|candidate| {
            restaurants_by_user
                .get(&candidate.user)
                .is_some_and(|theirs| !theirs.is_disjoint(target_restaurants))
        })
        .take(k)
        .copied()
        .collect();

    if !with_overlap.is_empty() {
        debug!(
            target = %target,
            neighbors = with_overlap.len(),
            "selected neighbors with restaurant overlap"
        );
        return NeighborSet {
            neighbors: with_overlap,
            mode: SelectionMode::RestaurantOverlap,
        };
    }

    positive.truncate(k);
    if positive.is_empty() {
        debug!(target = %target, "no neighbors with positive similarity");
    } else {
        warn!(
            target = %target,
            neighbors = positive.len(),
            "no restaurant overlap among candidates, falling back to raw similarity"
        );
    }
    NeighborSet {
        neighbors: positive,
        mode: SelectionMode::SimilarityFallback,
    }
}

/// Distinct visited restaurants per user, from raw observations.
fn visited_restaurants(observations: &[Observation]) -> HashMap<UserId, HashSet<&str>> {
    let mut map: HashMap<UserId, HashSet<&str>> = HashMap::new();
    for observation in observations {
        map.entry(observation.user)
            .or_default()
            .insert(observation.restaurant_name.as_str());
    }
    map
}
