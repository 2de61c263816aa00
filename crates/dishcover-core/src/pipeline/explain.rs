//! Common-taste explanations for (target, neighbor) pairs.

use std::collections::HashSet;

use crate::types::{CommonItem, Observation};

/// Dedup key: each combination kind appears once per pair.
#[derive(PartialEq, Eq, Hash)]
enum ComboKey {
    /// (dish, restaurant)
    Same(String, String),
    /// (sorted dish pair, restaurant)
    Different(String, String, String),
}

/// Intersect two users' liked (>= 4) observations into explanation items.
///
/// Exact (dish, restaurant) matches become [`CommonItem::SameDish`] with
/// both ratings; a shared restaurant with different dishes becomes
/// [`CommonItem::SameRestaurant`]. Scanning follows input order, so with
/// multi-visit duplicates the first pair encountered supplies the ratings.
pub(crate) fn common_items(
    target_liked: &[&Observation],
    neighbor_liked: &[&Observation],
) -> Vec<CommonItem> {
    let mut items = Vec::new();
    let mut seen: HashSet<ComboKey> = HashSet::new();

    for target_item in target_liked {
        for neighbor_item in neighbor_liked {
            if target_item.restaurant_name != neighbor_item.restaurant_name {
                continue;
            }
            if target_item.dish_name == neighbor_item.dish_name {
                let key = ComboKey::Same(
                    target_item.dish_name.clone(),
                    target_item.restaurant_name.clone(),
                );
                if seen.insert(key) {
                    items.push(CommonItem::SameDish {
                        dish: target_item.dish_name.clone(),
                        restaurant: target_item.restaurant_name.clone(),
                        user_rating: target_item.rating,
                        neighbor_rating: neighbor_item.rating,
                    });
                }
            } else {
                let (first, second) = if target_item.dish_name <= neighbor_item.dish_name {
                    (&target_item.dish_name, &neighbor_item.dish_name)
                } else {
                    (&neighbor_item.dish_name, &target_item.dish_name)
                };
                let key = ComboKey::Different(
                    first.clone(),
                    second.clone(),
                    target_item.restaurant_name.clone(),
                );
                if seen.insert(key) {
                    items.push(CommonItem::SameRestaurant {
                        user_dish: target_item.dish_name.clone(),
                        neighbor_dish: neighbor_item.dish_name.clone(),
                        restaurant: target_item.restaurant_name.clone(),
                    });
                }
            }
        }
    }
    items
}
