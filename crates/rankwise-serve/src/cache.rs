//! In-memory response caching with moka.
//!
//! The year and combination catalogs change rarely, so their query results
//! are memoized for a fixed window. Each cached entry stores serialized JSON
//! with the time it was cached.
//!
//! ## Cache Key Strategy
//!
//! Keys are the query name followed by every argument that affects the
//! result. The catalog queries take no arguments, so their keys are just
//! `unique_years` and `unique_combinations`.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::ApiError;

/// Default cache capacity (number of entries).
pub const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Cached response with metadata.
#[derive(Clone, Debug)]
pub struct CachedEntry {
    /// Serialized JSON response.
    pub json: String,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Type alias for the response cache.
pub type ResponseCache = Cache<String, CachedEntry>;

/// Create a new response cache whose entries expire after `ttl`.
pub fn new_cache(ttl: Duration) -> ResponseCache {
    Cache::builder()
        .max_capacity(DEFAULT_CACHE_CAPACITY)
        .time_to_live(ttl)
        .build()
}

/// Get a cached value or compute and cache it.
///
/// On a hit the stored JSON is deserialized and returned. On a miss, or if
/// the stored entry no longer deserializes, `compute` runs and its result is
/// cached before being returned. Errors from `compute` are not cached.
pub async fn get_or_compute<T, F, Fut>(
    cache: &ResponseCache,
    key: &str,
    compute: F,
) -> Result<T, ApiError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    // Check cache first
    if let Some(entry) = cache.get(key).await {
        match serde_json::from_str(&entry.json) {
            Ok(value) => {
                tracing::debug!(key = %key, cached_at = %entry.cached_at, "cache hit");
                return Ok(value);
            }
            Err(e) => {
                // Corrupted cache entry - log and continue to recompute
                tracing::warn!(key = %key, error = %e, "failed to deserialize cached entry");
            }
        }
    }

    // Cache miss - compute the value
    tracing::debug!(key = %key, "cache miss, computing");
    let value = compute().await?;

    // Serialize and cache the result
    match serde_json::to_string(&value) {
        Ok(json) => {
            let entry = CachedEntry {
                json,
                cached_at: chrono::Utc::now(),
            };
            cache.insert(key.to_string(), entry).await;
        }
        Err(e) => {
            // Failed to serialize - log but still return the value
            tracing::warn!(key = %key, error = %e, "failed to serialize for cache");
        }
    }

    Ok(value)
}

/// TTL values.
pub mod ttl {
    use std::time::Duration;

    /// Year and combination catalogs - 1 hour
    pub const CATALOG: Duration = Duration::from_secs(3600);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_hit() {
        let cache = new_cache(ttl::CATALOG);
        let key = "unique_years";

        // First call - cache miss
        let result: Vec<u16> = get_or_compute(&cache, key, || async { Ok(vec![2024, 2023]) })
            .await
            .unwrap();
        assert_eq!(result, vec![2024, 2023]);

        // Second call - cache hit (compute should not be called)
        let result: Vec<u16> = get_or_compute(&cache, key, || async {
            panic!("compute should not be called on cache hit")
        })
        .await
        .unwrap();
        assert_eq!(result, vec![2024, 2023]);
    }

    #[tokio::test]
    async fn test_cache_different_keys() {
        let cache = new_cache(ttl::CATALOG);

        let years: Vec<u16> = get_or_compute(&cache, "unique_years", || async { Ok(vec![2024]) })
            .await
            .unwrap();
        let combos: Vec<String> =
            get_or_compute(&cache, "unique_combinations", || async {
                Ok(vec!["A00".to_string()])
            })
            .await
            .unwrap();

        assert_eq!(years, vec![2024]);
        assert_eq!(combos, vec!["A00".to_string()]);
    }

    #[tokio::test]
    async fn test_errors_not_cached() {
        let cache = new_cache(ttl::CATALOG);

        let first: Result<Vec<u16>, ApiError> = get_or_compute(&cache, "unique_years", || async {
            Err(ApiError::BadRequest("database down".to_string()))
        })
        .await;
        assert!(first.is_err());

        let second: Vec<u16> = get_or_compute(&cache, "unique_years", || async { Ok(vec![2022]) })
            .await
            .unwrap();
        assert_eq!(second, vec![2022]);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = new_cache(Duration::from_millis(50));

        let _: u32 = get_or_compute(&cache, "k", || async { Ok(1) }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;

        let value: u32 = get_or_compute(&cache, "k", || async { Ok(2) }).await.unwrap();
        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn test_corrupted_entry_recomputed() {
        let cache = new_cache(ttl::CATALOG);
        cache
            .insert(
                "k".to_string(),
                CachedEntry {
                    json: "not json".to_string(),
                    cached_at: chrono::Utc::now(),
                },
            )
            .await;

        let value: u32 = get_or_compute(&cache, "k", || async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }
}
