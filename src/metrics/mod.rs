// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    INVENTORY_REQUESTS,
    INVENTORY_REQUEST_DURATION,
    TEXT_GENERATION_CALLS,
    TEXT_GENERATION_DURATION,
    CACHE_OPERATIONS,
    CACHE_ENTRIES,
    CHAT_QUERIES,
};

/// Collapse per-record paths so labels stay bounded
pub fn endpoint_label(endpoint: &str) -> &str {
    const NAME_PREFIX: &str = "/api/servers/name/";
    const SERVERS_PREFIX: &str = "/api/servers/";

    if endpoint.starts_with(NAME_PREFIX) {
        "/api/servers/name"
    } else if endpoint.starts_with(SERVERS_PREFIX) {
        "/api/servers/id"
    } else {
        endpoint
    }
}

/// Helper to record an inventory API call that went to the network
pub fn record_inventory_request(endpoint: &str, success: bool, duration_secs: f64) {
    let label = endpoint_label(endpoint);
    let outcome = if success { "success" } else { "error" };
    INVENTORY_REQUESTS.with_label_values(&[label, outcome]).inc();
    INVENTORY_REQUEST_DURATION
        .with_label_values(&[label])
        .observe(duration_secs);
}

/// Helper to record a text generation attempt
pub fn record_text_generation(outcome: &str, duration_secs: Option<f64>) {
    TEXT_GENERATION_CALLS.with_label_values(&[outcome]).inc();
    if let Some(secs) = duration_secs {
        TEXT_GENERATION_DURATION
            .with_label_values(&[outcome])
            .observe(secs);
    }
}

/// Helpers to record cache operations
pub fn record_cache_hit(cache: &str) {
    CACHE_OPERATIONS.with_label_values(&[cache, "hit"]).inc();
}

pub fn record_cache_miss(cache: &str) {
    CACHE_OPERATIONS.with_label_values(&[cache, "miss"]).inc();
}

pub fn record_cache_evictions(cache: &str, count: usize) {
    if count > 0 {
        CACHE_OPERATIONS
            .with_label_values(&[cache, "evict"])
            .inc_by(count as f64);
    }
}

pub fn update_cache_entries(cache: &str, count: usize) {
    CACHE_ENTRIES.with_label_values(&[cache]).set(count as f64);
}

/// Helper to record a classified chat query
pub fn record_query(intent: &str) {
    CHAT_QUERIES.with_label_values(&[intent]).inc();
}
