//! Empty-outcome and defect paths of the pipeline.

use dishcover_core::config::RecommenderConfig;
use dishcover_core::error::RecommendError;
use dishcover_core::pipeline::Recommender;
use dishcover_core::types::{EmptyReason, Observation, RestaurantId, UserId};

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

fn default_recommender() -> Recommender<'static> {
    Recommender::new(RecommenderConfig::default()).unwrap()
}

#[test]
fn target_who_rated_everything_gets_input_exhausted_not_a_crash() {
    let observations = vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 4),
        obs(2, "Laksa", "Straits Corner", 4),
    ];
    let result = default_recommender()
        .recommend(&observations, UserId(1))
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.empty_reason, Some(EmptyReason::InputExhausted));
}

#[test]
fn lone_user_has_no_neighbors() {
    let observations = vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 3),
        // A second user must exist to leave an unrated dish, but with
        // orthogonal taste there is no positive similarity.
        obs(2, "Otah", "Straits Corner", 4),
        obs(2, "Satay", "Straits Corner", 2),
    ];
    let result = default_recommender()
        .recommend(&observations, UserId(1))
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.empty_reason, Some(EmptyReason::NoNeighbors));
}

#[test]
fn uniform_rater_centers_to_zero_and_has_no_neighbors() {
    // The target rates everything 5: the centered row is the zero vector,
    // so similarity to everyone (including itself) is 0.
    let observations = vec![
        obs(1, "Laksa", "Straits Corner", 5),
        obs(1, "Mee Goreng", "Straits Corner", 5),
        obs(2, "Laksa", "Straits Corner", 5),
        obs(2, "Mee Goreng", "Straits Corner", 2),
        obs(2, "Otah", "Straits Corner", 5),
    ];
    let result = default_recommender()
        .recommend(&observations, UserId(1))
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.empty_reason, Some(EmptyReason::NoNeighbors));
}

#[test]
fn zero_review_target_is_a_rejected_precondition() {
    let observations = vec![obs(1, "Laksa", "Straits Corner", 5)];
    let error = default_recommender()
        .recommend(&observations, UserId(42))
        .unwrap_err();

    assert_eq!(error, RecommendError::UnknownUser(UserId(42)));
}

#[test]
fn empty_observation_batch_is_also_unknown_user() {
    let error = default_recommender().recommend(&[], UserId(1)).unwrap_err();
    assert_eq!(error, RecommendError::UnknownUser(UserId(1)));
}

#[test]
fn boost_enabled_without_collaborator_is_a_config_defect() {
    let mut config = RecommenderConfig::default();
    config.boost.enabled = true;
    let error = Recommender::new(config).unwrap_err();

    assert!(matches!(error, RecommendError::InvalidConfig(_)));
}

#[test]
fn invalid_rating_is_rejected_at_observation_construction() {
    let error = Observation::new(
        UserId(1),
        "Laksa",
        "Straits Corner",
        RestaurantId(1),
        None,
        6,
        1,
    )
    .unwrap_err();

    assert_eq!(error, RecommendError::InvalidRating { value: 6 });
}
