// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, GaugeVec, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_gauge_vec_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // INVENTORY API METRICS
    // ============================================================================

    /// Inventory API requests that reached the network
    pub static ref INVENTORY_REQUESTS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("inventory_requests_total", "Total inventory API requests"),
        &["endpoint", "outcome"], // outcome: success, error
        REGISTRY
    ).unwrap();

    /// Inventory API request duration
    pub static ref INVENTORY_REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("inventory_request_duration_seconds", "Inventory API request duration")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["endpoint"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // TEXT GENERATION METRICS
    // ============================================================================

    /// Gemini generation attempts
    pub static ref TEXT_GENERATION_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("text_generation_calls_total", "Total text generation attempts"),
        &["outcome"], // outcome: success, empty, error, skipped
        REGISTRY
    ).unwrap();

    /// Gemini generation duration
    pub static ref TEXT_GENERATION_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("text_generation_duration_seconds", "Text generation duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["outcome"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // CACHE METRICS
    // ============================================================================

    /// Cache operations
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("cache_operations_total", "Total cache operations"),
        &["cache", "operation"], // operation: hit, miss, evict
        REGISTRY
    ).unwrap();

    /// Current cache entries
    pub static ref CACHE_ENTRIES: GaugeVec = register_gauge_vec_with_registry!(
        Opts::new("cache_entries_current", "Current number of cache entries"),
        &["cache"],
        REGISTRY
    ).unwrap();

    // ============================================================================
    // CHAT METRICS
    // ============================================================================

    /// Classified user queries
    pub static ref CHAT_QUERIES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("chat_queries_total", "Total chat queries by classified intent"),
        &["intent"],
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Touch every collector so each family has at least one series
        INVENTORY_REQUESTS.with_label_values(&["/api/summary", "success"]).inc();
        TEXT_GENERATION_CALLS.with_label_values(&["skipped"]).inc();
        CACHE_OPERATIONS.with_label_values(&["api", "hit"]).inc();
        CHAT_QUERIES.with_label_values(&["summary"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("inventory_requests_total"));
        assert!(metrics.contains("text_generation_calls_total"));
        assert!(metrics.contains("cache_operations_total"));
        assert!(metrics.contains("chat_queries_total"));
    }
}
