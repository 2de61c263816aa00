//! Embedding provider seam.
//!
//! The recommendation core never talks to an embedding backend directly; it
//! goes through [`EmbeddingProvider`] so that tests and offline runs can use
//! [`StaticProvider`] while production wires in a real backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, EmbeddingResult};

/// Identity of a dish to embed.
///
/// A dish is only meaningful inside one restaurant, so the restaurant name is
/// part of the identity. Cuisine enriches the embedded text when known but is
/// not part of the cache identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Dish name as it appears on observations.
    pub dish: String,
    /// Restaurant the dish belongs to.
    pub restaurant: String,
    /// Cuisine tag, when known.
    pub cuisine: Option<String>,
}

impl EmbeddingRequest {
    /// Build a request from its parts.
    pub fn new(
        dish: impl Into<String>,
        restaurant: impl Into<String>,
        cuisine: Option<String>,
    ) -> Self {
        Self {
            dish: dish.into(),
            restaurant: restaurant.into(),
            cuisine,
        }
    }

    /// Text representation handed to the embedding backend.
    ///
    /// Format: `dish | restaurant` or `dish | restaurant | cuisine`.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.cuisine {
            Some(cuisine) => format!("{} | {} | {}", self.dish, self.restaurant, cuisine),
            None => format!("{} | {}", self.dish, self.restaurant),
        }
    }
}

/// Source of dish embedding vectors.
///
/// # Thread Safety
///
/// Requires `Send + Sync` so a provider can back concurrent cache warming.
///
/// # Error Handling
///
/// Failures are expected (backend down, unknown dish) and must degrade to
/// "no boost" at the call site, never abort a recommendation request.
pub trait EmbeddingProvider: Send + Sync {
    /// Produce the embedding vector for one dish.
    fn embed(&self, request: &EmbeddingRequest) -> EmbeddingResult<Vec<f32>>;
}

/// In-memory provider backed by a fixed map.
///
/// Used by tests and offline runs where vectors were computed ahead of time.
/// Unknown dishes yield [`EmbeddingError::NotFound`].
#[derive(Debug, Default, Clone)]
pub struct StaticProvider {
    vectors: HashMap<(String, String), Vec<f32>>,
}

impl StaticProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vector for a (dish, restaurant) pair.
    pub fn insert(
        &mut self,
        dish: impl Into<String>,
        restaurant: impl Into<String>,
        vector: Vec<f32>,
    ) {
        self.vectors.insert((dish.into(), restaurant.into()), vector);
    }

    /// Number of registered vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the provider has no vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl EmbeddingProvider for StaticProvider {
    fn embed(&self, request: &EmbeddingRequest) -> EmbeddingResult<Vec<f32>> {
        self.vectors
            .get(&(request.dish.clone(), request.restaurant.clone()))
            .cloned()
            .ok_or_else(|| EmbeddingError::NotFound {
                key: format!("{}@{}", request.dish, request.restaurant),
            })
    }
}
