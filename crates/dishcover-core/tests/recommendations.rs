//! End-to-end pipeline tests over real observation batches.

use dishcover_core::config::RecommenderConfig;
use dishcover_core::pipeline::Recommender;
use dishcover_core::types::{CommonItem, Observation, RestaurantId, UserId};

fn obs(user: u64, dish: &str, restaurant: &str, rating: u8) -> Observation {
    let restaurant_id = RestaurantId(restaurant.len() as u64);
    Observation::new(
        UserId(user),
        dish,
        restaurant,
        restaurant_id,
        None,
        rating,
        1,
    )
    .unwrap()
}

/// Two users share three liked dishes at one restaurant; the neighbor also
/// loves a dish at a second restaurant the target has never visited.
fn shared_taste_observations() -> Vec<Observation> {
    vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 4),
        obs(1, "Otah", "Straits Corner", 4),
        obs(2, "Laksa", "Straits Corner", 5),
        obs(2, "Mee Goreng", "Straits Corner", 4),
        obs(2, "Otah", "Straits Corner", 4),
        obs(2, "Carbonara", "Trattoria", 5),
    ]
}

#[test]
fn shared_taste_surfaces_the_neighbors_top_dish() {
    let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
    let result = recommender
        .recommend(&shared_taste_observations(), UserId(1))
        .unwrap();

    assert_eq!(result.items.len(), 1);
    let recommendation = &result.items[0];
    assert_eq!(recommendation.dish_name, "Carbonara");
    assert_eq!(recommendation.restaurant_name, "Trattoria");
    assert!(recommendation.new_restaurant);

    // Single neighbor: prediction = neighbor's centered rating (0.5)
    // plus the target's raw mean (13/3).
    assert!((recommendation.predicted_rating - (0.5 + 13.0 / 3.0)).abs() < 1e-3);

    assert_eq!(recommendation.supporters.len(), 1);
    let supporter = &recommendation.supporters[0];
    assert_eq!(supporter.neighbor, UserId(2));
    // Hand-computed cosine of the centered, zero-filled rows.
    assert!((supporter.similarity - 0.8165).abs() < 1e-3);
    assert!((supporter.rating - 5.0).abs() < 1e-6);

    // The three shared liked dishes each appear exactly once.
    let same_dishes: Vec<&str> = supporter
        .common_items
        .iter()
        .filter_map(|item| match item {
            CommonItem::SameDish { dish, .. } => Some(dish.as_str()),
            CommonItem::SameRestaurant { .. } => None,
        })
        .collect();
    assert_eq!(same_dishes, vec!["Laksa", "Mee Goreng", "Otah"]);
}

#[test]
fn novelty_outranks_a_higher_prediction_at_a_visited_restaurant() {
    // Target knows Straits Corner and Harbour Grill; the neighbor also
    // loves a dish at each of Harbour Grill (visited, strong prediction)
    // and Trattoria (unvisited, weaker prediction).
    let observations = vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 4),
        obs(1, "Grilled Squid", "Harbour Grill", 2),
        obs(2, "Laksa", "Straits Corner", 5),
        obs(2, "Mee Goreng", "Straits Corner", 4),
        obs(2, "Grilled Squid", "Harbour Grill", 2),
        obs(2, "Clam Chowder", "Harbour Grill", 5),
        obs(2, "Carbonara", "Trattoria", 4),
    ];
    let config = RecommenderConfig::default().with_min_predicted_rating(3.5);
    let recommender = Recommender::new(config).unwrap();
    let result = recommender.recommend(&observations, UserId(1)).unwrap();

    assert_eq!(result.items.len(), 2);
    // Carbonara predicts lower than Clam Chowder but its restaurant is new.
    assert_eq!(result.items[0].dish_name, "Carbonara");
    assert!(result.items[0].new_restaurant);
    assert_eq!(result.items[1].dish_name, "Clam Chowder");
    assert!(!result.items[1].new_restaurant);
    assert!(result.items[1].predicted_rating > result.items[0].predicted_rating);
}

#[test]
fn top_n_truncates_the_ranked_list() {
    let mut observations = vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 4),
        obs(2, "Laksa", "Straits Corner", 5),
        obs(2, "Mee Goreng", "Straits Corner", 4),
    ];
    for i in 0..5 {
        observations.push(obs(2, &format!("Special {i}"), "Straits Corner", 5));
    }
    let config = RecommenderConfig::default().with_top_n(3);
    let recommender = Recommender::new(config).unwrap();
    let result = recommender.recommend(&observations, UserId(1)).unwrap();

    assert_eq!(result.items.len(), 3);
}

#[test]
fn supporters_are_required_even_when_prediction_clears_threshold() {
    // Otah predicts exactly at the 4.0 threshold (neighbor's centered
    // rating 0 plus target mean 4.0), but the neighbor's raw 3 stars mean
    // no supporter, so the dish must not surface.
    let observations = vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 3),
        obs(2, "Laksa", "Straits Corner", 5),
        obs(2, "Mee Goreng", "Straits Corner", 3),
        obs(2, "Otah", "Straits Corner", 3),
        obs(2, "Satay", "Straits Corner", 1),
    ];
    let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
    let result = recommender.recommend(&observations, UserId(1)).unwrap();

    assert!(result.is_empty());
    assert_eq!(
        result.empty_reason,
        Some(dishcover_core::types::EmptyReason::NoQualifyingDish)
    );
}

#[test]
fn duplicate_visits_average_into_one_rating() {
    // User 2 rated Carbonara on two visits (5 then 3): the supporter
    // carries the averaged 4.0, not either single visit.
    let mut observations = shared_taste_observations();
    observations.retain(|o| o.dish_name != "Carbonara");
    let mut first = obs(2, "Carbonara", "Trattoria", 5);
    first.visit = 1;
    let mut second = obs(2, "Carbonara", "Trattoria", 3);
    second.visit = 2;
    observations.push(first);
    observations.push(second);

    let config = RecommenderConfig::default().with_min_predicted_rating(3.0);
    let recommender = Recommender::new(config).unwrap();
    let result = recommender.recommend(&observations, UserId(1)).unwrap();

    assert_eq!(result.items.len(), 1);
    let supporter = &result.items[0].supporters[0];
    assert!((supporter.rating - 4.0).abs() < 1e-6);
}

#[test]
fn result_serializes_to_flat_json() {
    let recommender = Recommender::new(RecommenderConfig::default()).unwrap();
    let result = recommender
        .recommend(&shared_taste_observations(), UserId(1))
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["items"][0]["dish_name"], "Carbonara");
    assert_eq!(json["items"][0]["supporters"][0]["neighbor"], 2);
    assert_eq!(
        json["items"][0]["supporters"][0]["common_items"][0]["type"],
        "same_dish_same_restaurant"
    );
}
