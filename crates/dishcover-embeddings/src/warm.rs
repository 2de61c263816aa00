//! Offline cache pre-warming.
//!
//! Warming is an optimization pass run before serving a request: it fills
//! the cache for a dish catalog so the synchronous prediction path never
//! blocks on the backend. The prediction core must produce identical output
//! whether warming ran serially, concurrently, or not at all; warming only
//! changes *when* vectors are fetched, never *what* is fetched.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info};

use crate::cache::{CacheKey, EmbeddingCache};
use crate::provider::{EmbeddingProvider, EmbeddingRequest};

/// Outcome of a warming pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmReport {
    /// Dishes in the warming request.
    pub requested: usize,
    /// Vectors already resident before the pass.
    pub already_cached: usize,
    /// Vectors fetched and stored by the pass.
    pub fetched: usize,
    /// Provider failures (skipped, retried on demand later).
    pub failed: usize,
}

/// Fill `cache` with vectors for every request, using at most
/// `max_concurrency` concurrent provider calls.
///
/// Per-dish failures are logged and skipped; the on-demand miss path will
/// retry them during prediction if they are ever needed.
pub fn warm_cache(
    cache: &EmbeddingCache,
    provider: &dyn EmbeddingProvider,
    requests: &[EmbeddingRequest],
    max_concurrency: usize,
) -> WarmReport {
    let already_cached = AtomicUsize::new(0);
    let fetched = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let warm_one = |request: &EmbeddingRequest| {
        let key = CacheKey::from_request(request);
        if cache.get(&key).is_some() {
            already_cached.fetch_add(1, Ordering::Relaxed);
            return;
        }
        match provider.embed(request) {
            Ok(vector) => {
                cache.insert(key, vector);
                fetched.fetch_add(1, Ordering::Relaxed);
            }
            Err(error) => {
                failed.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, error = %error, "warming skipped dish");
            }
        }
    };

    if max_concurrency <= 1 {
        requests.iter().for_each(warm_one);
    } else {
        // Dedicated bounded pool so warming cannot saturate a shared global
        // pool owned by the embedding backend's host process.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_concurrency)
            .build()
            .expect("failed to build warming thread pool");
        pool.install(|| {
            use rayon::prelude::*;
            requests.par_iter().for_each(warm_one);
        });
    }

    let report = WarmReport {
        requested: requests.len(),
        already_cached: already_cached.into_inner(),
        fetched: fetched.into_inner(),
        failed: failed.into_inner(),
    };
    info!(
        requested = report.requested,
        fetched = report.fetched,
        already_cached = report.already_cached,
        failed = report.failed,
        "embedding cache warming complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;

    fn catalog_requests() -> Vec<EmbeddingRequest> {
        (0..20)
            .map(|i| EmbeddingRequest::new(format!("Dish {i}"), "Straits Corner", None))
            .collect()
    }

    fn full_provider() -> StaticProvider {
        let mut provider = StaticProvider::new();
        for i in 0..20 {
            provider.insert(
                format!("Dish {i}"),
                "Straits Corner",
                vec![i as f32, 1.0, 0.5],
            );
        }
        provider
    }

    #[test]
    fn serial_and_concurrent_warming_fill_identical_caches() {
        let requests = catalog_requests();
        let provider = full_provider();

        let serial = EmbeddingCache::new();
        let concurrent = EmbeddingCache::new();
        let serial_report = warm_cache(&serial, &provider, &requests, 1);
        let concurrent_report = warm_cache(&concurrent, &provider, &requests, 4);

        assert_eq!(serial_report.fetched, 20);
        assert_eq!(concurrent_report.fetched, 20);
        for request in &requests {
            let key = CacheKey::from_request(request);
            assert_eq!(serial.get(&key).unwrap(), concurrent.get(&key).unwrap());
        }
    }

    #[test]
    fn warming_skips_resident_entries() {
        let requests = catalog_requests();
        let provider = full_provider();
        let cache = EmbeddingCache::new();

        warm_cache(&cache, &provider, &requests, 2);
        let second = warm_cache(&cache, &provider, &requests, 2);

        assert_eq!(second.already_cached, 20);
        assert_eq!(second.fetched, 0);
    }

    #[test]
    fn failures_are_skipped_not_fatal() {
        let requests = catalog_requests();
        let mut provider = StaticProvider::new();
        // Only half the catalog has vectors.
        for i in 0..10 {
            provider.insert(format!("Dish {i}"), "Straits Corner", vec![1.0]);
        }

        let cache = EmbeddingCache::new();
        let report = warm_cache(&cache, &provider, &requests, 3);

        assert_eq!(report.fetched, 10);
        assert_eq!(report.failed, 10);
        assert_eq!(cache.len(), 10);
    }
}
