// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::cache::{CacheReport, CacheScope, PerformanceReport};
use crate::chatbot::HealthReport;
use crate::error::ChatbotError;
use crate::metrics::gather_metrics;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Handler for `/v1/chat`
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatbotError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(ChatbotError::InvalidRequest("query must not be empty".to_string()));
    }

    let response = state.chatbot.generate_response(query).await;
    Ok(Json(ChatResponse { response }))
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.chatbot.health_check().await)
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<PerformanceReport> {
    Json(state.chatbot.get_performance_stats())
}

pub async fn cache_handler(State(state): State<AppState>) -> Json<CacheReport> {
    Json(state.chatbot.get_cache_stats())
}

/// Handler for `DELETE /cache/:scope`
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Result<StatusCode, ChatbotError> {
    let scope: CacheScope = scope.parse().map_err(ChatbotError::InvalidRequest)?;
    let removed = state.chatbot.clear_cache(scope);
    info!("Cleared {} cache over HTTP: {} entries removed", scope, removed);
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `/metrics` (Prometheus text exposition)
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}
