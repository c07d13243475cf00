//! Time-bounded cache for upstream JSON responses.
//!
//! One page render fans out into many closely related upstream queries
//! (schedule dates, trends for both teams, head-to-head), so successful
//! responses are reused for a short TTL. Entries are kept past their TTL:
//! a rate-limited or failed refresh falls back to the last good payload
//! instead of rendering an empty section.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

/// Thread-safe response cache keyed by path + sorted query string.
///
/// Reads and writes race benignly: a lost write costs one extra upstream
/// call, a stale-by-seconds read is within tolerance.
#[derive(Clone)]
pub struct ResponseCache {
    ttl: Duration,
    inner: Arc<RwLock<HashMap<String, CachedResponse>>>,
}

struct CachedResponse {
    stored_at: Instant,
    value: Value,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            ttl,
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return the cached value for `key` if it is still within the TTL.
    pub async fn fresh(&self, key: &str) -> Option<Value> {
        let inner = self.inner.read().await;
        inner
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() <= self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Return the cached value for `key` regardless of age. Used as the
    /// fallback when the upstream refuses or fails a refresh.
    pub async fn stale(&self, key: &str) -> Option<Value> {
        let inner = self.inner.read().await;
        inner.get(key).map(|entry| entry.value.clone())
    }

    pub async fn store(&self, key: &str, value: Value) {
        let mut inner = self.inner.write().await;
        inner.insert(
            key.to_string(),
            CachedResponse {
                stored_at: Instant::now(),
                value,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fresh_hit_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.store("k", json!({"data": [1, 2, 3]})).await;
        assert_eq!(cache.fresh("k").await, Some(json!({"data": [1, 2, 3]})));
    }

    #[tokio::test]
    async fn miss_on_unknown_key() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        assert!(cache.fresh("nope").await.is_none());
        assert!(cache.stale("nope").await.is_none());
    }

    #[tokio::test]
    async fn expired_entry_still_readable_as_stale() {
        // Zero TTL: every entry is immediately expired.
        let cache = ResponseCache::new(Duration::from_secs(0));
        cache.store("k", json!({"data": []})).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.fresh("k").await.is_none());
        assert_eq!(cache.stale("k").await, Some(json!({"data": []})));
    }

    #[tokio::test]
    async fn store_overwrites_previous_value() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.store("k", json!(1)).await;
        cache.store("k", json!(2)).await;
        assert_eq!(cache.fresh("k").await, Some(json!(2)));
    }
}
