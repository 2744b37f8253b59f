//! Shared result cache with per-entry TTL and LRU eviction.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::types::{CacheEntry, CacheInfo};

/// In-memory key/value store with per-entry expiry.
///
/// Expired entries are dropped lazily when read, or in bulk by [`ResultCache::purge_expired`].
/// A `get` never returns an expired value. When full, the least recently used entry is
/// evicted. The cache itself never fails; a miss is just `None`.
#[derive(Debug)]
pub struct ResultCache<V> {
    entries: RwLock<LruCache<String, CacheEntry<V>>>,
}

impl<V: Clone> ResultCache<V> {
    /// Creates a cache holding at most `capacity` entries (minimum one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Retrieves a value if present and not expired
    #[instrument(skip(self), fields(cache_key = %key))]
    pub async fn get(&self, key: &str) -> Option<V> {
        // LRU lookups update recency, so even reads take the write lock
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get(key) {
            if !entry.is_expired() {
                debug!(
                    "Cache hit: key={}, age={:?}, remaining={:?}",
                    key,
                    entry.cached_at.elapsed(),
                    entry.time_until_expiry()
                );
                return Some(entry.value.clone());
            }

            debug!(
                "Removing expired cache entry: key={}, age={:?}, ttl={:?}",
                key,
                entry.cached_at.elapsed(),
                entry.ttl
            );
            entries.pop(key);
        } else {
            debug!("Cache miss: key={}", key);
        }

        None
    }

    /// Stores a value, replacing any previous entry under the same key
    #[instrument(skip(self, value), fields(cache_key = %key))]
    pub async fn set(&self, key: &str, value: V, ttl: Duration) {
        let mut entries = self.entries.write().await;
        if let Some((evicted, _)) =
            entries.push(key.to_string(), CacheEntry::new(key.to_string(), value, ttl))
            && evicted != key
        {
            debug!("Evicted least recently used entry: key={}", evicted);
        }
        info!("Cached result: key={}, ttl={:?}", key, ttl);
    }

    /// Removes an entry. Returns true if one was present (expired or not).
    #[instrument(skip(self), fields(cache_key = %key))]
    pub async fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.write().await.pop(key).is_some();
        if removed {
            info!("Invalidated cache entry: key={}", key);
        }
        removed
    }

    /// Removes every expired entry and returns how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            entries.pop(key);
        }

        if !expired.is_empty() {
            info!("Purged {} expired cache entries", expired.len());
        }
        expired.len()
    }

    /// Clears all entries
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, including expired ones not yet purged
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Keys currently stored, most recently used first
    pub async fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub async fn stats(&self) -> CacheInfo {
        let entries = self.entries.read().await;
        CacheInfo {
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}
