//! Cross-cutting helpers.
//!
//! - `logging`: tracing initialization and API-key redaction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
