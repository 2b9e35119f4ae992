//! Axum-based HTTP surface for the chatbot.
//!
//! Exposes `generate_response`, the health report, statistics, cache
//! clearing and Prometheus metrics to a UI or operator.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{ChatRequest, ChatResponse};
pub use routes::{create_router, AppState};
