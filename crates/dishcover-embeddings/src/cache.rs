//! Caller-owned memoizing cache for dish embeddings.
//!
//! One embedding per (dish, restaurant) pair, no eviction: dish identity is
//! immutable for the lifetime of a dataset, so an entry never goes stale.
//! The cache is owned by the caller and passed by reference into the boost
//! path; lookups are pure functions of (key, cache contents), with an
//! explicit miss path that calls the provider and writes back.
//!
//! Provider failures are NOT cached: the next request retries, so a
//! transient backend outage does not poison the cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::provider::{EmbeddingProvider, EmbeddingRequest};

/// Cache key: the (dish, restaurant) identity of an embedding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Dish name.
    pub dish: String,
    /// Restaurant the dish belongs to.
    pub restaurant: String,
}

impl CacheKey {
    /// Key for a (dish, restaurant) pair.
    pub fn new(dish: impl Into<String>, restaurant: impl Into<String>) -> Self {
        Self {
            dish: dish.into(),
            restaurant: restaurant.into(),
        }
    }

    /// Key identifying the same dish as `request`.
    #[must_use]
    pub fn from_request(request: &EmbeddingRequest) -> Self {
        Self {
            dish: request.dish.clone(),
            restaurant: request.restaurant.clone(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.dish, self.restaurant)
    }
}

/// Thread-safe hit/miss/store counters.
#[derive(Debug, Default)]
struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
    failures: AtomicU64,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from memory.
    pub hits: u64,
    /// Lookups that had to consult the provider.
    pub misses: u64,
    /// Vectors written back after a successful provider call.
    pub stores: u64,
    /// Provider calls that failed (nothing cached).
    pub failures: u64,
    /// Entries currently resident.
    pub entries: usize,
}

/// In-memory embedding cache with no eviction.
///
/// # Thread Safety
///
/// `RwLock` over the entry map: concurrent readers, exclusive writers.
/// Vectors are stored behind `Arc` so a hit never copies the data.
#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: RwLock<HashMap<CacheKey, Arc<Vec<f32>>>>,
    metrics: CacheMetrics,
}

impl EmbeddingCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a vector without touching the provider.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<f32>>> {
        let entries = self.entries.read().expect("embedding cache lock poisoned");
        entries.get(key).cloned()
    }

    /// Insert a vector, replacing any previous entry for the key.
    pub fn insert(&self, key: CacheKey, vector: Vec<f32>) {
        let mut entries = self.entries.write().expect("embedding cache lock poisoned");
        entries.insert(key, Arc::new(vector));
        self.metrics.stores.fetch_add(1, Ordering::Relaxed);
    }

    /// Resolve an embedding: cached value, or provider call with write-back.
    ///
    /// Returns `None` when the provider fails; the failure is logged and the
    /// caller degrades to "no boost". Failures are retried on the next call.
    pub fn get_or_fetch(
        &self,
        request: &EmbeddingRequest,
        provider: &dyn EmbeddingProvider,
    ) -> Option<Arc<Vec<f32>>> {
        let key = CacheKey::from_request(request);
        if let Some(vector) = self.get(&key) {
            self.metrics.hits.fetch_add(1, Ordering::Relaxed);
            return Some(vector);
        }
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);

        match provider.embed(request) {
            Ok(vector) => {
                let vector = Arc::new(vector);
                let mut entries = self.entries.write().expect("embedding cache lock poisoned");
                let stored = entries.entry(key).or_insert_with(|| Arc::clone(&vector));
                self.metrics.stores.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(stored))
            }
            Err(error) => {
                self.metrics.failures.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %error, "embedding lookup failed, degrading to no boost");
                None
            }
        }
    }

    /// Number of cached vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("embedding cache lock poisoned")
            .len()
    }

    /// Whether the cache holds no vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.metrics.hits.load(Ordering::Relaxed),
            misses: self.metrics.misses.load(Ordering::Relaxed),
            stores: self.metrics.stores.load(Ordering::Relaxed),
            failures: self.metrics.failures.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
