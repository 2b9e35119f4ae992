// Inventory API client with response caching
// Author: kelexine (https://github.com/kelexine)

use crate::cache::{api_cache_key, CacheManager};
use crate::config::InventoryConfig;
use crate::error::{ApiError, ChatbotError, Result};
use crate::metrics;
use crate::models::{Server, Summary};
use crate::query::QueryData;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Client for the read-only inventory REST API.
///
/// Every request is checked against the API cache first. A cache hit returns
/// without touching the network and without moving the call counters.
pub struct InventoryClient {
    http_client: Client,
    base_url: String,
    cache: Arc<CacheManager>,
}

impl InventoryClient {
    /// Create a client for `config.base_url` that records into `cache`.
    pub fn new(config: &InventoryConfig, cache: Arc<CacheManager>) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .pool_idle_timeout(Duration::from_secs(90))
            .use_rustls_tls()
            .build()
            .map_err(|e| ChatbotError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!("Inventory client configured for {}", config.base_url);

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// Get the inventory base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a cached GET against `endpoint` with query `params`.
    ///
    /// `endpoint` gains a leading `/` if it lacks one. Fails on non-2xx
    /// status, connection failure, timeout or an invalid JSON body.
    pub async fn request(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Value, ApiError> {
        let endpoint = normalize_endpoint(endpoint);
        let cache_key = api_cache_key(&endpoint, params);

        if let Some(cached) = self.cache.get_api(&cache_key) {
            return Ok(cached);
        }

        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Making API request: {} with params: {:?}", url, params);

        let start = Instant::now();
        let result = self.send(&url, &endpoint, params, start).await;
        let elapsed = start.elapsed();
        metrics::record_inventory_request(&endpoint, result.is_ok(), elapsed.as_secs_f64());

        match result {
            Ok(data) => {
                self.cache.record_api_call(elapsed);
                info!(
                    "API call to {} completed in {:.2}s. Response size: {} chars",
                    endpoint,
                    elapsed.as_secs_f64(),
                    data.to_string().len()
                );
                self.cache.set_api(&cache_key, data.clone());
                Ok(data)
            }
            Err(e) => {
                error!("{}", e);
                Err(e)
            }
        }
    }

    async fn send(
        &self,
        url: &str,
        endpoint: &str,
        params: &[(&str, &str)],
        start: Instant,
    ) -> std::result::Result<Value, ApiError> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint, start.elapsed().as_secs_f64(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                elapsed: start.elapsed().as_secs_f64(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint, start.elapsed().as_secs_f64(), e))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// Fleet summary, or the failure as an error object.
    pub async fn summary(&self) -> QueryData {
        match self.request("/api/summary", &[]).await {
            Ok(value) => match serde_json::from_value::<Summary>(value) {
                Ok(summary) => QueryData::Summary(summary),
                Err(e) => QueryData::Error(format!("Invalid summary payload: {}", e)),
            },
            Err(e) => {
                warn!("Failed to get server summary: {}", e);
                QueryData::Error(e.to_string())
            }
        }
    }

    /// Free-text search over name, IP and notes.
    pub async fn search_servers(&self, query: &str) -> Vec<Server> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.list("search servers", &[("search", query)]).await
    }

    pub async fn servers_by_environment(&self, environment: &str) -> Vec<Server> {
        if environment.trim().is_empty() {
            return Vec::new();
        }
        self.list("get servers by environment", &[("environment", environment)])
            .await
    }

    pub async fn servers_by_status(&self, status: &str) -> Vec<Server> {
        if status.trim().is_empty() {
            return Vec::new();
        }
        self.list("get servers by status", &[("status", status)]).await
    }

    pub async fn servers_by_location(&self, location: &str) -> Vec<Server> {
        if location.trim().is_empty() {
            return Vec::new();
        }
        self.list("get servers by location", &[("location", location)])
            .await
    }

    pub async fn all_servers(&self) -> Vec<Server> {
        self.list("get all servers", &[]).await
    }

    /// Single server by exact name, or the failure as an error object.
    pub async fn server_by_name(&self, name: &str) -> QueryData {
        if name.trim().is_empty() {
            return QueryData::Error("No server name given".to_string());
        }
        let endpoint = format!("/api/servers/name/{}", urlencoding::encode(name));
        self.single("get server by name", &endpoint).await
    }

    /// Single server by id, or the failure as an error object.
    pub async fn server_by_id(&self, id: &str) -> QueryData {
        if id.trim().is_empty() {
            return QueryData::Error("No server id given".to_string());
        }
        let endpoint = format!("/api/servers/{}", urlencoding::encode(id));
        self.single("get server by id", &endpoint).await
    }

    async fn list(&self, what: &str, params: &[(&str, &str)]) -> Vec<Server> {
        match self.request("/api/servers", params).await {
            Ok(value) => parse_servers(value),
            Err(e) => {
                warn!("Failed to {}: {}", what, e);
                Vec::new()
            }
        }
    }

    async fn single(&self, what: &str, endpoint: &str) -> QueryData {
        match self.request(endpoint, &[]).await {
            Ok(value) => parse_server(value),
            Err(e) => {
                warn!("Failed to {}: {}", what, e);
                QueryData::Error(e.to_string())
            }
        }
    }
}

/// Ensure the endpoint starts with `/`.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{}", endpoint)
    }
}

/// Array payloads become servers; malformed records are skipped, anything else is empty.
fn parse_servers(value: Value) -> Vec<Server> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Server>(item) {
                Ok(server) => Some(server),
                Err(e) => {
                    warn!("Skipping malformed server record: {}", e);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_server(value: Value) -> QueryData {
    if let Some(message) = value.get("error").or_else(|| value.get("detail")) {
        let message = message
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| message.to_string());
        return QueryData::Error(message);
    }
    match serde_json::from_value::<Server>(value) {
        Ok(server) => QueryData::Server(server),
        Err(e) => QueryData::Error(format!("Invalid server payload: {}", e)),
    }
}
