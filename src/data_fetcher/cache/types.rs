//! Cache data structures with TTL support

use std::time::Duration;
use tokio::time::Instant;

use crate::data_fetcher::models::{Fixture, League};

/// A cached value together with its insertion time and lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub key: String,
    pub value: V,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Creates a new cache entry stamped with the current time
    pub fn new(key: String, value: V, ttl: Duration) -> Self {
        Self {
            key,
            value,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// An entry is expired once strictly more than its TTL has elapsed
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry(&self) -> Duration {
        self.ttl.saturating_sub(self.cached_at.elapsed())
    }
}

/// Canonical records stored by the gateway. Raw provider payloads are never cached.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedRecords {
    Leagues(Vec<League>),
    Fixtures(Vec<Fixture>),
}

impl CachedRecords {
    pub fn len(&self) -> usize {
        match self {
            CachedRecords::Leagues(items) => items.len(),
            CachedRecords::Fixtures(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Record types that can be stored in and recovered from [`CachedRecords`].
pub trait Cacheable: Sized {
    fn into_cached(items: Vec<Self>) -> CachedRecords;

    /// Returns `None` when the stored records are of another kind
    fn from_cached(records: CachedRecords) -> Option<Vec<Self>>;
}

impl Cacheable for League {
    fn into_cached(items: Vec<Self>) -> CachedRecords {
        CachedRecords::Leagues(items)
    }

    fn from_cached(records: CachedRecords) -> Option<Vec<Self>> {
        match records {
            CachedRecords::Leagues(items) => Some(items),
            CachedRecords::Fixtures(_) => None,
        }
    }
}

impl Cacheable for Fixture {
    fn into_cached(items: Vec<Self>) -> CachedRecords {
        CachedRecords::Fixtures(items)
    }

    fn from_cached(records: CachedRecords) -> Option<Vec<Self>> {
        match records {
            CachedRecords::Fixtures(items) => Some(items),
            CachedRecords::Leagues(_) => None,
        }
    }
}

/// Size and capacity of a cache, for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheInfo {
    pub size: usize,
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_strictly_after_ttl() {
        let entry = CacheEntry::new("k".to_string(), 1u8, Duration::from_secs(10));
        assert!(!entry.is_expired());

        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(!entry.is_expired());
        assert_eq!(entry.time_until_expiry(), Duration::ZERO);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(entry.is_expired());
    }

    #[test]
    fn test_cached_records_kind_mismatch() {
        let records = League::into_cached(vec![]);
        assert!(records.is_empty());
        assert!(Fixture::from_cached(records.clone()).is_none());
        assert_eq!(League::from_cached(records), Some(vec![]));
    }
}
