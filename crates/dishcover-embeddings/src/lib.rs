//! Dishcover Embedding Collaborator
//!
//! Supplies the semantic dish-similarity signal consumed by the
//! recommendation core:
//!
//! - [`EmbeddingProvider`]: seam to the embedding backend, with
//!   [`StaticProvider`] for tests and offline runs
//! - [`EmbeddingCache`]: caller-owned memoizing cache keyed by
//!   (dish, restaurant), no eviction, hit/miss metrics
//! - [`similarity`]: dense cosine/dot/norm primitives, shared with the
//!   collaborative-filtering core
//! - [`warm_cache`]: bounded-concurrency offline pre-warming
//!
//! # Example
//!
//! ```
//! use dishcover_embeddings::{EmbeddingCache, EmbeddingRequest, StaticProvider};
//!
//! let mut provider = StaticProvider::new();
//! provider.insert("Laksa", "Straits Corner", vec![0.9, 0.1]);
//!
//! let cache = EmbeddingCache::new();
//! let request = EmbeddingRequest::new("Laksa", "Straits Corner", None);
//! let vector = cache.get_or_fetch(&request, &provider).expect("registered");
//! assert_eq!(vector.len(), 2);
//! assert_eq!(cache.stats().misses, 1);
//! ```

pub mod cache;
pub mod error;
pub mod provider;
pub mod similarity;
pub mod warm;

// Re-exports for convenience
pub use cache::{CacheKey, CacheStats, EmbeddingCache};
pub use error::{EmbeddingError, EmbeddingResult};
pub use provider::{EmbeddingProvider, EmbeddingRequest, StaticProvider};
pub use warm::{warm_cache, WarmReport};
