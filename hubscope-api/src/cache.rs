//! In-memory TTL cache for listing results.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use hubscope_core::ModelId;

/// Default time-to-live for cached listings.
pub const DEFAULT_TTL_SECS: u64 = 300;

struct CacheEntry {
    stored_at: Instant,
    identifiers: Vec<ModelId>,
}

/// Caches listing results per requested limit.
///
/// Listings for different limits are cached independently, so a request
/// for 50 models never serves a truncated 20-model listing.
pub struct ListingCache {
    ttl: Duration,
    entries: Mutex<HashMap<usize, CacheEntry>>,
}

impl ListingCache {
    /// Creates a cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached listing for `limit`, unless it has expired.
    pub async fn get(&self, limit: usize) -> Option<Vec<ModelId>> {
        let mut entries = self.entries.lock().await;
        match entries.get(&limit) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                Some(entry.identifiers.clone())
            }
            Some(_) => {
                debug!(limit, "Evicting expired listing");
                entries.remove(&limit);
                None
            }
            None => None,
        }
    }

    /// Stores a listing for `limit`.
    pub async fn put(&self, limit: usize, identifiers: Vec<ModelId>) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            limit,
            CacheEntry {
                stored_at: Instant::now(),
                identifiers,
            },
        );
    }
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ModelId> {
        names.iter().map(|s| ModelId::new(*s)).collect()
    }

    #[tokio::test]
    async fn test_get_before_expiry() {
        let cache = ListingCache::new(Duration::from_secs(60));
        cache.put(20, ids(&["org/a", "org/b"])).await;

        let cached = cache.get(20).await.unwrap();
        assert_eq!(cached.len(), 2);
    }

    #[tokio::test]
    async fn test_get_after_expiry() {
        let cache = ListingCache::new(Duration::from_millis(10));
        cache.put(20, ids(&["org/a"])).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get(20).await.is_none());
    }

    #[tokio::test]
    async fn test_limits_are_cached_independently() {
        let cache = ListingCache::new(Duration::from_secs(60));
        cache.put(10, ids(&["org/a"])).await;
        cache.put(20, ids(&["org/a", "org/b"])).await;

        assert_eq!(cache.get(10).await.unwrap().len(), 1);
        assert_eq!(cache.get(20).await.unwrap().len(), 2);
        assert!(cache.get(50).await.is_none());
    }
}
