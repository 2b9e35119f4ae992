// invchat - conversational query layer over a server-inventory API
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod chatbot;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod inventory;
pub mod metrics;
pub mod models;
pub mod query;
pub mod response;
pub mod server;
pub mod utils;
