// Error types for invchat
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the inventory service.
///
/// These never reach the end user as-is: the inventory client converts them
/// into empty collections or embedded error strings.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API timeout after {elapsed:.2}s for {endpoint}")]
    Timeout { endpoint: String, elapsed: f64 },

    #[error("Connection error after {elapsed:.2}s for {endpoint}")]
    Connection { endpoint: String, elapsed: f64 },

    #[error("HTTP error {status} after {elapsed:.2}s for {endpoint}")]
    Status {
        endpoint: String,
        status: u16,
        elapsed: f64,
    },

    #[error("Invalid JSON response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Unexpected error after {elapsed:.2}s for {endpoint}: {reason}")]
    Unexpected {
        endpoint: String,
        elapsed: f64,
        reason: String,
    },
}

impl ApiError {
    /// Classify a reqwest failure for `endpoint`.
    pub fn from_reqwest(endpoint: &str, elapsed: f64, err: reqwest::Error) -> Self {
        let endpoint = endpoint.to_string();
        if err.is_timeout() {
            ApiError::Timeout { endpoint, elapsed }
        } else if err.is_connect() {
            ApiError::Connection { endpoint, elapsed }
        } else if let Some(status) = err.status() {
            ApiError::Status {
                endpoint,
                status: status.as_u16(),
                elapsed,
            }
        } else if err.is_decode() {
            ApiError::Decode {
                endpoint,
                reason: err.to_string(),
            }
        } else {
            ApiError::Unexpected {
                endpoint,
                elapsed,
                reason: err.to_string(),
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ChatbotError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Text generation error: {0}")]
    TextGen(String),

    #[error("Gemini initialization failed: {0}")]
    GeminiInit(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Convert ChatbotError to HTTP responses for Axum
impl IntoResponse for ChatbotError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ChatbotError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            ChatbotError::Api(_) => (StatusCode::BAD_GATEWAY, "inventory_error"),
            ChatbotError::TextGen(_) | ChatbotError::GeminiInit(_) => {
                (StatusCode::BAD_GATEWAY, "text_generation_error")
            }
            ChatbotError::Config(_) | ChatbotError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ChatbotError>;
