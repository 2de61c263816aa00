// Demo: full recommendation flow over a small in-memory dataset,
// with the dish-similarity boost wired to a static embedding provider.
use dishcover_core::config::{BoostConfig, RecommenderConfig};
use dishcover_core::pipeline::Recommender;
use dishcover_core::stats::DatasetStats;
use dishcover_core::types::{CommonItem, Observation, RestaurantId, UserId};
use dishcover_embeddings::{warm_cache, EmbeddingCache, EmbeddingRequest, StaticProvider};

fn obs(
    user: u64,
    dish: &str,
    restaurant: &str,
    restaurant_id: u64,
    cuisine: &str,
    rating: u8,
    visit: u32,
) -> Observation {
    Observation::new(
        UserId(user),
        dish,
        restaurant,
        RestaurantId(restaurant_id),
        Some(cuisine.to_string()),
        rating,
        visit,
    )
    .expect("demo ratings are valid")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // A tiny multi-visit dataset: three regulars at a hawker stall, one of
    // whom also knows an Italian place the target has never tried.
    let observations = vec![
        obs(1, "Laksa", "Straits Corner", 1, "Peranakan", 5, 1),
        obs(1, "Mee Goreng", "Straits Corner", 1, "Peranakan", 4, 1),
        obs(1, "Otah", "Straits Corner", 1, "Peranakan", 4, 2),
        obs(2, "Laksa", "Straits Corner", 1, "Peranakan", 5, 1),
        obs(2, "Mee Goreng", "Straits Corner", 1, "Peranakan", 4, 1),
        obs(2, "Otah", "Straits Corner", 1, "Peranakan", 4, 1),
        obs(2, "Prawn Noodles", "Straits Corner", 1, "Peranakan", 5, 2),
        obs(2, "Carbonara", "Trattoria Nonna", 2, "Italian", 5, 2),
        obs(3, "Laksa", "Straits Corner", 1, "Peranakan", 2, 1),
        obs(3, "Prawn Noodles", "Straits Corner", 1, "Peranakan", 5, 1),
    ];

    let stats = DatasetStats::from_observations(&observations);
    println!(
        "Dataset: {} reviews, {} users, {} dishes, {} restaurants (mean {:.2} stars)",
        stats.reviews, stats.users, stats.dishes, stats.restaurants, stats.mean_rating
    );

    // Offline-computed vectors; a production deployment would back this
    // with a real embedding service behind the same trait.
    let mut provider = StaticProvider::new();
    provider.insert("Laksa", "Straits Corner", vec![0.9, 0.1, 0.0]);
    provider.insert("Mee Goreng", "Straits Corner", vec![0.8, 0.2, 0.1]);
    provider.insert("Otah", "Straits Corner", vec![0.7, 0.1, 0.2]);
    provider.insert("Prawn Noodles", "Straits Corner", vec![0.85, 0.15, 0.05]);
    provider.insert("Carbonara", "Trattoria Nonna", vec![0.1, 0.9, 0.3]);

    let cache = EmbeddingCache::new();
    let requests: Vec<EmbeddingRequest> = observations
        .iter()
        .map(|o| {
            EmbeddingRequest::new(
                o.dish_name.clone(),
                o.restaurant_name.clone(),
                o.cuisine.clone(),
            )
        })
        .collect();
    let report = warm_cache(&cache, &provider, &requests, 4);
    println!(
        "Warmed {} embeddings ({} failed)",
        report.fetched, report.failed
    );

    let config = RecommenderConfig::default().with_boost(BoostConfig {
        enabled: true,
        ..BoostConfig::default()
    });
    let recommender =
        Recommender::with_embeddings(config, &provider, &cache).expect("valid config");

    let target = UserId(1);
    let result = recommender
        .recommend(&observations, target)
        .expect("well-formed dataset");

    if let Some(reason) = result.empty_reason {
        println!("No recommendations for user {target}: {reason:?}");
        return;
    }

    println!("\nTop dishes for user {target}:");
    for (rank, item) in result.items.iter().enumerate() {
        let novelty = if item.new_restaurant {
            "new to you"
        } else {
            "you've visited"
        };
        println!(
            "{}. {} at {} ({novelty}), predicted {:.2}/5.0",
            rank + 1,
            item.dish_name,
            item.restaurant_name,
            item.predicted_rating
        );
        for supporter in &item.supporters {
            println!(
                "   supporter: user {} ({:.0}% taste match) gave it {:.0} stars",
                supporter.neighbor,
                supporter.similarity * 100.0,
                supporter.rating
            );
            for common in &supporter.common_items {
                match common {
                    CommonItem::SameDish {
                        dish,
                        restaurant,
                        user_rating,
                        neighbor_rating,
                    } => println!(
                        "     both loved '{dish}' at {restaurant} (you: {}, them: {})",
                        user_rating.value(),
                        neighbor_rating.value()
                    ),
                    CommonItem::SameRestaurant {
                        user_dish,
                        neighbor_dish,
                        restaurant,
                    } => println!(
                        "     you loved '{user_dish}' and they loved '{neighbor_dish}' at {restaurant}"
                    ),
                }
            }
        }
    }

    println!("\nEmbedding cache: {:?}", cache.stats());
}
