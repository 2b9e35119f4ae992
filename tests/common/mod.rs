// Shared fixtures for integration tests
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use invchat::chatbot::ServerChatbot;
use invchat::config::AppConfig;
use invchat::error::{ChatbotError, Result};
use invchat::gemini::{BackendState, TextCompletion};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const SUMMARY_BODY: &str = r#"{
    "total_servers": 12,
    "active_servers": 11,
    "servers_up": 9,
    "servers_down": 1,
    "servers_maintenance": 2,
    "environments": {"production": 6, "staging": 4, "development": 2}
}"#;

pub const DOWN_SERVERS_BODY: &str = r#"[
    {"name": "chennai-db-01", "ip_address": "10.0.2.1", "status": "down", "environment": "production"}
]"#;

/// Deterministic text-completion stub that counts its calls.
pub struct StubBackend {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubBackend {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for StubBackend {
    async fn generate_content(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| ChatbotError::TextGen("backend unavailable".to_string()))
    }
}

pub fn config_for(inventory_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.inventory.base_url = inventory_url.to_string();
    config.inventory.timeout_seconds = 5;
    config.gemini.timeout_seconds = 5;
    config
}

pub fn chatbot(inventory_url: &str, backend: BackendState) -> ServerChatbot {
    ServerChatbot::with_backend(&config_for(inventory_url), backend).unwrap()
}
