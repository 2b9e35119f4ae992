//! Structured logging and secret redaction.
//!
//! Configures the `tracing` subscriber for the binary and provides
//! [`sanitize`] so Gemini API keys never reach a log sink.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{ChatbotError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prefix shared by Google API keys.
const API_KEY_PREFIX: &str = "AIza";

/// Query parameter carrying the key in URL-authenticated requests.
const KEY_PARAM: &str = "key=";

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level` when set. `json` selects structured
/// output; anything else gets the human-readable `pretty` format.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ChatbotError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    result.map_err(|e| ChatbotError::Internal(format!("Failed to install logger: {}", e)))
}

fn token_end(s: &str, start: usize) -> usize {
    s[start..]
        .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '&' | ',' | ')'))
        .map(|i| start + i)
        .unwrap_or(s.len())
}

/// Replace every occurrence of `marker`, and the token following it, with `replacement`.
/// When `keep_marker` is set the marker itself survives.
fn redact(input: &str, marker: &str, replacement: &str, keep_marker: bool) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(marker) {
        let value_start = pos + marker.len();
        let end = token_end(rest, value_start);
        result.push_str(&rest[..pos]);
        if keep_marker {
            result.push_str(marker);
        }
        result.push_str(replacement);
        rest = &rest[end..];
    }
    result.push_str(rest);
    result
}

/// Redacts Gemini API keys from a string before it is logged.
///
/// Handles bare `AIza…` keys and the value of any `key=` query parameter.
pub fn sanitize(input: &str) -> String {
    let result = redact(input, KEY_PARAM, "[REDACTED]", true);
    redact(&result, API_KEY_PREFIX, "[REDACTED_API_KEY]", false)
}
