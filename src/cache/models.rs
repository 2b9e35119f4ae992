//! Cache configuration, scope selection, and statistics models.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration for the response caches.
///
/// Shared by both cache instances; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds an entry stays valid after its last write.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Size bound for the inventory API response cache.
    #[serde(default = "default_max_api_entries")]
    pub max_api_entries: usize,
    /// Size bound for the generated-text cache.
    #[serde(default = "default_max_gemini_entries")]
    pub max_gemini_entries: usize,
}

impl Default for CacheConfig {
    /// Provides default values for cache configuration.
    ///
    /// - `ttl_seconds`: 60
    /// - `max_api_entries`: 50
    /// - `max_gemini_entries`: 100
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            max_api_entries: default_max_api_entries(),
            max_gemini_entries: default_max_gemini_entries(),
        }
    }
}

fn default_ttl_seconds() -> u64 {
    60
}

fn default_max_api_entries() -> usize {
    50
}

fn default_max_gemini_entries() -> usize {
    100
}

/// Which cache a `clear` call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheScope {
    Api,
    TextGen,
    All,
}

impl CacheScope {
    pub fn includes_api(self) -> bool {
        matches!(self, CacheScope::Api | CacheScope::All)
    }

    pub fn includes_text_gen(self) -> bool {
        matches!(self, CacheScope::TextGen | CacheScope::All)
    }
}

impl FromStr for CacheScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(CacheScope::Api),
            "gemini" | "text-gen" | "text_gen" => Ok(CacheScope::TextGen),
            "all" => Ok(CacheScope::All),
            other => Err(format!(
                "Unknown cache scope '{}'. Expected one of: api, gemini, all",
                other
            )),
        }
    }
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CacheScope::Api => "api",
            CacheScope::TextGen => "gemini",
            CacheScope::All => "all",
        };
        f.write_str(s)
    }
}

/// Monotonic counters mutated by every cache and client operation.
///
/// Times are wall-clock seconds.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PerformanceStats {
    pub api_calls: u64,
    pub total_api_time: f64,
    pub gemini_calls: u64,
    pub total_gemini_time: f64,
    pub gemini_errors: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl PerformanceStats {
    /// Average inventory API response time.
    pub fn avg_api_time(&self) -> f64 {
        self.total_api_time / self.api_calls.max(1) as f64
    }

    /// Average Gemini response time.
    pub fn avg_gemini_time(&self) -> f64 {
        self.total_gemini_time / self.gemini_calls.max(1) as f64
    }

    /// Cache hit ratio as a percentage.
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        self.cache_hits as f64 / total.max(1) as f64 * 100.0
    }
}

/// Snapshot of [`PerformanceStats`] with derived ratios and cache sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub api_calls: u64,
    pub total_api_time: f64,
    pub avg_api_time: f64,
    pub gemini_calls: u64,
    pub total_gemini_time: f64,
    pub avg_gemini_time: f64,
    pub gemini_errors: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_ratio: f64,
    pub api_cache_size: usize,
    pub gemini_cache_size: usize,
}

impl PerformanceReport {
    pub fn new(stats: &PerformanceStats, api_cache_size: usize, gemini_cache_size: usize) -> Self {
        Self {
            api_calls: stats.api_calls,
            total_api_time: round_to(stats.total_api_time, 2),
            avg_api_time: round_to(stats.avg_api_time(), 2),
            gemini_calls: stats.gemini_calls,
            total_gemini_time: round_to(stats.total_gemini_time, 2),
            avg_gemini_time: round_to(stats.avg_gemini_time(), 2),
            gemini_errors: stats.gemini_errors,
            cache_hits: stats.cache_hits,
            cache_misses: stats.cache_misses,
            cache_hit_ratio: round_to(stats.cache_hit_ratio(), 1),
            api_cache_size,
            gemini_cache_size,
        }
    }
}

/// Entry counts for one cache instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheScopeReport {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub max_size: usize,
}

/// Entry counts for both caches plus the shared TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheReport {
    pub api_cache: CacheScopeReport,
    pub gemini_cache: CacheScopeReport,
    pub ttl_seconds: u64,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
