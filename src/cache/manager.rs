// Cache manager - owns both response caches and the performance counters
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{
    CacheConfig, CacheReport, CacheScope, CacheScopeReport, PerformanceReport, PerformanceStats,
};
use crate::cache::ttl::TtlCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const API_CACHE: &str = "api";
const GEMINI_CACHE: &str = "gemini";

struct CacheState {
    api: TtlCache<Value>,
    gemini: TtlCache<String>,
    stats: PerformanceStats,
}

/// Per-chatbot cache state.
///
/// The inventory API cache, the generated-text cache and the performance
/// counters sit behind a single mutex, so read-then-write sequences on cache
/// size and timestamps stay atomic when one instance is shared across tasks.
pub struct CacheManager {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(config: CacheConfig) -> Self {
        let ttl = Duration::from_secs(config.ttl_seconds);
        Self::with_ttl(config, ttl)
    }

    /// Create a manager whose TTL is given directly rather than in whole seconds.
    pub fn with_ttl(config: CacheConfig, ttl: Duration) -> Self {
        let state = CacheState {
            api: TtlCache::new(API_CACHE, ttl, config.max_api_entries),
            gemini: TtlCache::new(GEMINI_CACHE, ttl, config.max_gemini_entries),
            stats: PerformanceStats::default(),
        };
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    pub fn get_api(&self, key: &str) -> Option<Value> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.api.get(key, &mut state.stats)
    }

    pub fn set_api(&self, key: &str, value: Value) {
        self.state.lock().api.set(key, value);
    }

    /// Cached generated text for `key`, logged with its age on a hit.
    pub fn get_gemini(&self, key: &str) -> Option<String> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let hit = state.gemini.get(key, &mut state.stats);
        if hit.is_some() {
            if let Some(age) = state.gemini.age(key) {
                info!("Using cached Gemini response (age: {:.1}s)", age.as_secs_f64());
            }
        }
        hit
    }

    pub fn set_gemini(&self, key: &str, text: String) {
        self.state.lock().gemini.set(key, text);
    }

    /// Count one completed inventory call.
    pub fn record_api_call(&self, duration: Duration) {
        let mut state = self.state.lock();
        state.stats.api_calls += 1;
        state.stats.total_api_time += duration.as_secs_f64();
    }

    /// Count one successful generation.
    pub fn record_gemini_call(&self, duration: Duration) {
        let mut state = self.state.lock();
        state.stats.gemini_calls += 1;
        state.stats.total_gemini_time += duration.as_secs_f64();
    }

    pub fn record_gemini_error(&self) {
        self.state.lock().stats.gemini_errors += 1;
    }

    /// Clear the selected caches, returning the number of entries removed.
    pub fn clear(&self, scope: CacheScope) -> usize {
        let mut state = self.state.lock();
        let mut removed = 0;

        if scope.includes_api() {
            let n = state.api.clear();
            info!("API cache cleared: {} entries removed", n);
            removed += n;
        }
        if scope.includes_text_gen() {
            let n = state.gemini.clear();
            info!("Gemini cache cleared: {} entries removed", n);
            removed += n;
        }

        debug!("Cleared {} cache entries (scope: {})", removed, scope);
        removed
    }

    /// Snapshot of the raw counters.
    pub fn stats(&self) -> PerformanceStats {
        self.state.lock().stats.clone()
    }

    pub fn performance_report(&self) -> PerformanceReport {
        let state = self.state.lock();
        PerformanceReport::new(&state.stats, state.api.len(), state.gemini.len())
    }

    pub fn cache_report(&self) -> CacheReport {
        let state = self.state.lock();
        CacheReport {
            api_cache: scope_report(&state.api),
            gemini_cache: scope_report(&state.gemini),
            ttl_seconds: self.config.ttl_seconds,
        }
    }

    /// Entries currently stored across both caches, expired ones included.
    pub fn total_entries(&self) -> usize {
        let state = self.state.lock();
        state.api.len() + state.gemini.len()
    }

    /// Combined size bound of both caches.
    pub fn capacity(&self) -> usize {
        self.config.max_api_entries + self.config.max_gemini_entries
    }
}

fn scope_report<V: Clone>(cache: &TtlCache<V>) -> CacheScopeReport {
    let total = cache.len();
    let valid = cache.valid_len();
    CacheScopeReport {
        total_entries: total,
        valid_entries: valid,
        expired_entries: total - valid,
        max_size: cache.max_entries(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_caches_share_one_stats_object() {
        let manager = CacheManager::new(CacheConfig::default());

        manager.set_api("/api/summary:{}", json!({"total_servers": 3}));
        manager.set_gemini("abc", "hello".to_string());

        assert!(manager.get_api("/api/summary:{}").is_some());
        assert_eq!(manager.get_gemini("abc").as_deref(), Some("hello"));
        assert!(manager.get_gemini("missing").is_none());

        let stats = manager.stats();
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.cache_misses, 1);
    }

    #[test]
    fn test_clear_scopes() {
        let manager = CacheManager::new(CacheConfig::default());
        manager.set_api("a", json!(1));
        manager.set_gemini("b", "x".to_string());

        assert_eq!(manager.clear(CacheScope::Api), 1);
        assert_eq!(manager.total_entries(), 1);
        assert_eq!(manager.clear(CacheScope::TextGen), 1);
        assert_eq!(manager.total_entries(), 0);

        manager.set_api("a", json!(1));
        manager.set_gemini("b", "x".to_string());
        assert_eq!(manager.clear(CacheScope::All), 2);
    }

    #[test]
    fn test_cache_report_counts_expired_entries() {
        let manager = CacheManager::with_ttl(CacheConfig::default(), Duration::from_millis(20));
        manager.set_api("a", json!(1));
        std::thread::sleep(Duration::from_millis(40));
        manager.set_api("b", json!(2));

        let report = manager.cache_report();
        assert_eq!(report.api_cache.total_entries, 2);
        assert_eq!(report.api_cache.valid_entries, 1);
        assert_eq!(report.api_cache.expired_entries, 1);
        assert_eq!(report.api_cache.max_size, 50);
        assert_eq!(report.gemini_cache.max_size, 100);
        assert_eq!(report.ttl_seconds, 60);
    }

    #[test]
    fn test_call_counters() {
        let manager = CacheManager::new(CacheConfig::default());
        manager.record_api_call(Duration::from_millis(500));
        manager.record_api_call(Duration::from_millis(1500));
        manager.record_gemini_call(Duration::from_secs(2));
        manager.record_gemini_error();

        let report = manager.performance_report();
        assert_eq!(report.api_calls, 2);
        assert_eq!(report.avg_api_time, 1.0);
        assert_eq!(report.gemini_calls, 1);
        assert_eq!(report.gemini_errors, 1);
    }
}
