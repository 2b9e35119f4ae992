//! Text-completion backend and the gateway that guards it.
//!
//! The backend sits behind the [`TextCompletion`] trait so the chatbot can run
//! against Gemini, a stub, or nothing at all. [`connect`] decides which: a
//! missing or placeholder key yields [`BackendState::Unavailable`], a key that
//! fails its smoke test is a hard error.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod client;
mod gateway;
mod prompt;

pub use client::GeminiClient;
pub use gateway::TextGenGateway;
pub use prompt::{build_context, build_prompt, SYSTEM_PROMPT};

use crate::config::GeminiConfig;
use crate::error::{ChatbotError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Keys starting with this are treated as unfilled template values.
const PLACEHOLDER_PREFIX: &str = "your_";

/// A service that turns a prompt into text.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String>;
}

/// Readiness of the text-completion backend after initialization.
#[derive(Clone)]
pub enum BackendState {
    Ready(Arc<dyn TextCompletion>),
    Unavailable { reason: String },
}

impl BackendState {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        BackendState::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BackendState::Ready(_))
    }
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendState::Ready(_) => f.write_str("Ready"),
            BackendState::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

/// The configured key, unless it is missing, blank or a placeholder.
pub fn usable_api_key(api_key: Option<&str>) -> Option<&str> {
    api_key
        .map(str::trim)
        .filter(|key| !key.is_empty() && !key.starts_with(PLACEHOLDER_PREFIX))
}

/// Build the Gemini backend and smoke-test it.
///
/// Returns `Unavailable` without touching the network when no usable key is
/// configured, and `GeminiInit` when the key is present but the test call fails.
pub async fn connect(config: &GeminiConfig) -> Result<BackendState> {
    let Some(api_key) = usable_api_key(config.api_key.as_deref()) else {
        warn!("No valid Gemini API key found. Operating in basic mode.");
        return Ok(BackendState::unavailable("no valid API key configured"));
    };

    let client = GeminiClient::new(config, api_key)
        .map_err(|e| ChatbotError::GeminiInit(e.to_string()))?;

    if let Err(e) = client.check_connectivity().await {
        error!("Failed to initialize Gemini: {}", e);
        return Err(ChatbotError::GeminiInit(e.to_string()));
    }

    info!("Gemini client initialized successfully with model: {}", client.model());
    Ok(BackendState::Ready(Arc::new(client)))
}
