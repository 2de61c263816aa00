//! Boost, cache, and warming behavior through the full pipeline.

use dishcover_core::config::{BoostConfig, RecommenderConfig};
use dishcover_core::pipeline::Recommender;
use dishcover_core::types::{Observation, RestaurantId, UserId};
use dishcover_embeddings::{warm_cache, EmbeddingCache, EmbeddingRequest, StaticProvider};

fn obs(user: u64, dish: &str, restaurant: &str, rating: u8) -> Observation {
    Observation::new(
        UserId(user),
        dish,
        restaurant,
        RestaurantId(1),
        None,
        rating,
        1,
    )
    .unwrap()
}

/// Target likes two dishes at Straits Corner; the neighbor additionally
/// loves one more dish there and one at an unvisited restaurant.
fn observations() -> Vec<Observation> {
    vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 4),
        obs(2, "Laksa", "Straits Corner", 5),
        obs(2, "Mee Goreng", "Straits Corner", 4),
        obs(2, "Otah", "Straits Corner", 5),
        obs(2, "Carbonara", "Trattoria", 5),
    ]
}

/// Every dish on its own axis: all pairwise similarities are 0, so the
/// boost formula always lands on 1.0.
fn orthogonal_provider() -> StaticProvider {
    let mut provider = StaticProvider::new();
    let dishes = [
        ("Laksa", "Straits Corner"),
        ("Mee Goreng", "Straits Corner"),
        ("Otah", "Straits Corner"),
        ("Carbonara", "Trattoria"),
    ];
    for (i, (dish, restaurant)) in dishes.iter().enumerate() {
        let mut vector = vec![0.0f32; dishes.len()];
        vector[i] = 1.0;
        provider.insert(*dish, *restaurant, vector);
    }
    provider
}

fn boosted_config() -> RecommenderConfig {
    RecommenderConfig::default().with_boost(BoostConfig {
        enabled: true,
        ..BoostConfig::default()
    })
}

#[test]
fn disabling_boost_reproduces_plain_collaborative_filtering() {
    let observations = observations();

    let plain = Recommender::new(RecommenderConfig::default()).unwrap();
    let expected = plain.recommend(&observations, UserId(1)).unwrap();

    let provider = orthogonal_provider();
    let cache = EmbeddingCache::new();
    let boosted = Recommender::with_embeddings(boosted_config(), &provider, &cache).unwrap();
    let actual = boosted.recommend(&observations, UserId(1)).unwrap();

    // With no semantically similar dishes the boost is always 1.0, so the
    // boosted pipeline is exactly the base algorithm; the boost is
    // additive, not a replacement.
    assert_eq!(actual, expected);
    assert_eq!(actual.items.len(), 2);
    assert_eq!(actual.items[0].dish_name, "Carbonara");
}

#[test]
fn boosted_request_populates_the_cache_and_later_requests_hit_it() {
    let observations = observations();
    let provider = orthogonal_provider();
    let cache = EmbeddingCache::new();
    let recommender = Recommender::with_embeddings(boosted_config(), &provider, &cache).unwrap();

    let first = recommender.recommend(&observations, UserId(1)).unwrap();
    // Otah is the only boosted candidate (the target liked nothing at
    // Trattoria), so the request fetched Otah plus the two liked dishes.
    assert_eq!(cache.len(), 3);
    let after_first = cache.stats();
    assert!(after_first.misses >= 3);

    let second = recommender.recommend(&observations, UserId(1)).unwrap();
    let after_second = cache.stats();
    assert_eq!(second, first);
    assert_eq!(after_second.misses, after_first.misses);
    assert!(after_second.hits > after_first.hits);
}

#[test]
fn embedding_failures_degrade_to_plain_collaborative_filtering() {
    let observations = observations();

    let plain = Recommender::new(RecommenderConfig::default()).unwrap();
    let expected = plain.recommend(&observations, UserId(1)).unwrap();

    // A provider that knows nothing: every lookup fails.
    let provider = StaticProvider::new();
    let cache = EmbeddingCache::new();
    let boosted = Recommender::with_embeddings(boosted_config(), &provider, &cache).unwrap();
    let actual = boosted.recommend(&observations, UserId(1)).unwrap();

    assert_eq!(actual, expected);
    assert!(cache.stats().failures > 0);
}

#[test]
fn predictions_stay_clamped_under_extreme_boost_parameters() {
    let observations = observations();
    // Every dish shares one vector: maximal semantic similarity everywhere,
    // so the extreme parameters below actually bite.
    let mut provider = StaticProvider::new();
    for (dish, restaurant) in [
        ("Laksa", "Straits Corner"),
        ("Mee Goreng", "Straits Corner"),
        ("Otah", "Straits Corner"),
        ("Carbonara", "Trattoria"),
    ] {
        provider.insert(dish, restaurant, vec![1.0, 0.0]);
    }
    let cache = EmbeddingCache::new();
    let config = RecommenderConfig::default().with_boost(BoostConfig {
        enabled: true,
        beta_same: 1.0e6,
        beta_similar: 1.0e6,
        max_boost: 1.0e9,
    });
    let recommender = Recommender::with_embeddings(config, &provider, &cache).unwrap();

    let result = recommender.recommend(&observations, UserId(1)).unwrap();
    assert!(!result.is_empty());
    for item in &result.items {
        assert!(
            (1.0..=5.0).contains(&item.predicted_rating),
            "prediction {} escaped the star scale",
            item.predicted_rating
        );
    }
}

#[test]
fn warming_order_never_changes_the_recommendations() {
    let observations = observations();
    let provider = orthogonal_provider();
    let requests: Vec<EmbeddingRequest> = [
        ("Laksa", "Straits Corner"),
        ("Mee Goreng", "Straits Corner"),
        ("Otah", "Straits Corner"),
        ("Carbonara", "Trattoria"),
    ]
    .iter()
    .map(|(dish, restaurant)| EmbeddingRequest::new(*dish, *restaurant, None))
    .collect();

    let cold_cache = EmbeddingCache::new();
    let cold = Recommender::with_embeddings(boosted_config(), &provider, &cold_cache).unwrap();
    let cold_result = cold.recommend(&observations, UserId(1)).unwrap();

    let serial_cache = EmbeddingCache::new();
    warm_cache(&serial_cache, &provider, &requests, 1);
    let serial = Recommender::with_embeddings(boosted_config(), &provider, &serial_cache).unwrap();
    let serial_result = serial.recommend(&observations, UserId(1)).unwrap();

    let concurrent_cache = EmbeddingCache::new();
    warm_cache(&concurrent_cache, &provider, &requests, 4);
    let concurrent =
        Recommender::with_embeddings(boosted_config(), &provider, &concurrent_cache).unwrap();
    let concurrent_result = concurrent.recommend(&observations, UserId(1)).unwrap();

    assert_eq!(serial_result, cold_result);
    assert_eq!(concurrent_result, cold_result);
    // Warming meant the request itself never missed.
    assert_eq!(concurrent_cache.stats().misses, 0);
}
