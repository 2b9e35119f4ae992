//! The conversational entry point.
//!
//! [`ServerChatbot`] ties the pieces together for one conversation: classify
//! and fetch, answer deterministically where a template exists, and hand the
//! rest to the text-generation gateway. Each instance owns its caches and
//! counters; nothing is shared between instances.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::cache::{CacheManager, CacheReport, CacheScope, PerformanceReport};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::{self, BackendState, TextGenGateway};
use crate::inventory::InventoryClient;
use crate::metrics;
use crate::query::{analyze, QueryData};
use crate::response::{compose, Composed};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Fraction of combined cache capacity above which health reports a warning.
const CACHE_WARNING_RATIO: f64 = 0.9;

/// Characters of the user query echoed into the log.
const LOGGED_QUERY_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Healthy,
    Warning,
}

/// Operational snapshot returned by [`ServerChatbot::health_check`].
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub api_connectivity: bool,
    pub backend_available: bool,
    pub cache_status: CacheStatus,
    pub performance: PerformanceReport,
    pub timestamp: String,
}

pub struct ServerChatbot {
    inventory: InventoryClient,
    gateway: TextGenGateway,
    cache: Arc<CacheManager>,
}

impl ServerChatbot {
    /// Build a chatbot and initialize the Gemini backend from `config`.
    ///
    /// Fails only when a credential is configured and rejected.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        info!("Initializing ServerChatbot with API: {}", config.inventory.base_url);
        let backend = gemini::connect(&config.gemini).await?;
        Self::with_backend(config, backend)
    }

    /// Build a chatbot around an already-initialized backend.
    pub fn with_backend(config: &AppConfig, backend: BackendState) -> Result<Self> {
        let cache = Arc::new(CacheManager::new(config.cache.clone()));
        Self::with_cache(config, backend, cache)
    }

    /// Build a chatbot around a backend and a pre-built cache manager.
    pub fn with_cache(
        config: &AppConfig,
        backend: BackendState,
        cache: Arc<CacheManager>,
    ) -> Result<Self> {
        let inventory = InventoryClient::new(&config.inventory, cache.clone())?;
        let gateway = TextGenGateway::new(
            backend,
            cache.clone(),
            Duration::from_secs(config.gemini.timeout_seconds),
        );
        Ok(Self {
            inventory,
            gateway,
            cache,
        })
    }

    pub fn inventory(&self) -> &InventoryClient {
        &self.inventory
    }

    pub fn is_backend_available(&self) -> bool {
        self.gateway.is_available()
    }

    /// Answer a free-text question. Never fails; every error path ends in text.
    pub async fn generate_response(&self, query: &str) -> String {
        let start = Instant::now();
        let shown: String = query.chars().take(LOGGED_QUERY_CHARS).collect();
        let ellipsis = if query.chars().count() > LOGGED_QUERY_CHARS { "..." } else { "" };
        info!("Processing user query: '{}{}'", shown, ellipsis);

        let analysis = analyze(query, &self.inventory).await;
        metrics::record_query(analysis.intent.as_str());

        if let QueryData::Error(message) = &analysis.data {
            warn!("Data fetch for '{}' query failed: {}", analysis.intent, message);
        }

        let response = match compose(query, &analysis) {
            Composed::Text(text) => text,
            Composed::Delegate => self.gateway.respond(query, &analysis).await,
        };

        info!(
            "Generated {} response in {:.2}s",
            analysis.intent,
            start.elapsed().as_secs_f64()
        );
        response
    }

    /// Probe inventory connectivity and summarise cache and backend state.
    pub async fn health_check(&self) -> HealthReport {
        let api_connectivity = matches!(self.inventory.summary().await, QueryData::Summary(_));
        if !api_connectivity {
            warn!("Inventory API health check failed");
        }

        let capacity = self.cache.capacity() as f64;
        let cache_status = if self.cache.total_entries() as f64 > capacity * CACHE_WARNING_RATIO {
            CacheStatus::Warning
        } else {
            CacheStatus::Healthy
        };

        HealthReport {
            api_connectivity,
            backend_available: self.is_backend_available(),
            cache_status,
            performance: self.get_performance_stats(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Drop cached entries in `scope`. Returns the number removed.
    pub fn clear_cache(&self, scope: CacheScope) -> usize {
        self.cache.clear(scope)
    }

    pub fn get_performance_stats(&self) -> PerformanceReport {
        self.cache.performance_report()
    }

    pub fn get_cache_stats(&self) -> CacheReport {
        self.cache.cache_report()
    }
}

impl fmt::Display for ServerChatbot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServerChatbot(api_url='{}', gemini_available={}, api_calls={})",
            self.inventory.base_url(),
            self.is_backend_available(),
            self.cache.stats().api_calls
        )
    }
}
