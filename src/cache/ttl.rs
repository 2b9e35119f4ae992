// Time-boxed key/value store with size-bounded eviction
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::PerformanceStats;
use crate::metrics;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// A cached value and the instant it was last written.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
    // Write order, breaks ties between equal instants during eviction.
    seq: u64,
}

/// Generic TTL cache.
///
/// Validity is checked lazily on read; stale entries stay in the map until a
/// write triggers cleanup or the cache is cleared. There is no background sweeper.
#[derive(Debug)]
pub struct TtlCache<V> {
    name: &'static str,
    entries: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
    max_entries: usize,
    next_seq: u64,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache. `name` labels logs and metrics.
    pub fn new(name: &'static str, ttl: Duration, max_entries: usize) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            ttl,
            max_entries,
            next_seq: 0,
        }
    }

    /// True if `key` is present and younger than the TTL.
    pub fn is_valid(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| entry.stored_at.elapsed() < self.ttl)
            .unwrap_or(false)
    }

    /// Look up a valid entry, counting a hit or a miss in `stats`.
    ///
    /// Expired entries count as misses but are not removed here.
    pub fn get(&self, key: &str, stats: &mut PerformanceStats) -> Option<V> {
        if self.is_valid(key) {
            if let Some(entry) = self.entries.get(key) {
                stats.cache_hits += 1;
                metrics::record_cache_hit(self.name);
                debug!(cache = self.name, "Cache hit: {}", key);
                return Some(entry.value.clone());
            }
        }

        stats.cache_misses += 1;
        metrics::record_cache_miss(self.name);
        None
    }

    /// Age of the entry for `key`, valid or not.
    pub fn age(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).map(|entry| entry.stored_at.elapsed())
    }

    /// Insert or overwrite `key`, refreshing its timestamp.
    ///
    /// Returns the number of entries evicted by the size bound.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> usize {
        let key = key.into();
        let seq = self.next_seq;
        self.next_seq += 1;

        debug!(cache = self.name, "Cache set: {}", key);
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
                seq,
            },
        );

        let evicted = if self.entries.len() > self.max_entries {
            self.evict_oldest()
        } else {
            0
        };
        metrics::update_cache_entries(self.name, self.entries.len());
        evicted
    }

    /// Remove the oldest quarter of the entries, ranked by write time.
    fn evict_oldest(&mut self) -> usize {
        let mut ranked: Vec<(Instant, u64, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.stored_at, entry.seq, key.clone()))
            .collect();
        ranked.sort();

        let count = ranked.len() / 4;
        for (_, _, key) in ranked.into_iter().take(count) {
            self.entries.remove(&key);
        }

        metrics::record_cache_evictions(self.name, count);
        debug!(cache = self.name, "Cache cleaned: removed {} entries", count);
        count
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        metrics::update_cache_entries(self.name, 0);
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that are still within the TTL.
    pub fn valid_len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .count()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl: Duration, max: usize) -> TtlCache<String> {
        TtlCache::new("test", ttl, max)
    }

    #[test]
    fn test_set_then_get_is_hit() {
        let mut stats = PerformanceStats::default();
        let mut c = cache(Duration::from_secs(60), 10);

        c.set("k", "v".to_string());
        assert_eq!(c.get("k", &mut stats), Some("v".to_string()));
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 0);
    }

    #[test]
    fn test_absent_key_is_miss() {
        let mut stats = PerformanceStats::default();
        let c = cache(Duration::from_secs(60), 10);

        assert_eq!(c.get("missing", &mut stats), None);
        assert_eq!(stats.cache_misses, 1);
    }

    #[test]
    fn test_expired_entry_is_miss_but_kept() {
        let mut stats = PerformanceStats::default();
        let mut c = cache(Duration::from_millis(30), 10);

        c.set("k", "v".to_string());
        std::thread::sleep(Duration::from_millis(60));

        assert!(!c.is_valid("k"));
        assert_eq!(c.get("k", &mut stats), None);
        assert_eq!(stats.cache_misses, 1);
        // Lazy expiry: the stale entry is still stored.
        assert!(c.contains_key("k"));
        assert_eq!(c.len(), 1);
        assert_eq!(c.valid_len(), 0);
    }

    #[test]
    fn test_set_refreshes_timestamp() {
        let mut stats = PerformanceStats::default();
        let mut c = cache(Duration::from_millis(80), 10);

        c.set("k", "old".to_string());
        std::thread::sleep(Duration::from_millis(50));
        c.set("k", "new".to_string());
        std::thread::sleep(Duration::from_millis(50));

        assert_eq!(c.get("k", &mut stats), Some("new".to_string()));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_eviction_removes_oldest_quarter() {
        let mut c = cache(Duration::from_secs(60), 8);
        for i in 0..8 {
            assert_eq!(c.set(format!("k{}", i), i.to_string()), 0);
        }

        // Ninth write exceeds the bound: floor(9 / 4) = 2 oldest go.
        let evicted = c.set("k8", "8".to_string());
        assert_eq!(evicted, 2);
        assert_eq!(c.len(), 7);
        assert!(!c.contains_key("k0"));
        assert!(!c.contains_key("k1"));
        assert!(c.contains_key("k2"));
        assert!(c.contains_key("k8"));
    }

    #[test]
    fn test_clear() {
        let mut c = cache(Duration::from_secs(60), 10);
        c.set("a", "1".to_string());
        c.set("b", "2".to_string());
        assert_eq!(c.clear(), 2);
        assert!(c.is_empty());
    }
}
