//! Configuration data structures for invchat.
//!
//! This module defines the schema for the application settings: the HTTP
//! surface, the inventory service connection, the Gemini backend, caching
//! and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::cache::CacheConfig;
use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Inventory service connection settings.
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Gemini text-completion backend settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// TTL and size bounds for the response caches.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8501`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream inventory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Base URL of the inventory REST API.
    /// Default: `http://localhost:8000`
    #[serde(default = "default_inventory_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the Gemini text-completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key. When absent or a placeholder the chatbot runs in basic mode.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for `generateContent`.
    /// Default: `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_inventory_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_inventory_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
