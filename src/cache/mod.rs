// Cache management module
// Author: kelexine (https://github.com/kelexine)

pub mod key;
pub mod manager;
pub mod models;
pub mod ttl;

pub use key::{api_cache_key, prompt_cache_key};
pub use manager::CacheManager;
pub use models::{
    CacheConfig, CacheReport, CacheScope, CacheScopeReport, PerformanceReport, PerformanceStats,
};
pub use ttl::{CacheEntry, TtlCache};
