// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    cache_handler, chat_handler, clear_cache_handler, health_handler, metrics_handler,
    stats_handler,
};
use super::middleware::request_id_layers;
use crate::chatbot::ServerChatbot;
use crate::config::AppConfig;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub chatbot: Arc<ServerChatbot>,
}

pub fn create_router(config: AppConfig, chatbot: Arc<ServerChatbot>) -> Router {
    let state = AppState { config, chatbot };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/chat", post(chat_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", get(cache_handler))
        .route("/cache/:scope", delete(clear_cache_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
