//! Data models for the inventory service and the Gemini API.
//!
//! This module contains the type definitions for:
//! - Inventory records consumed from the read-only REST API (`inventory`)
//! - The Gemini `generateContent` request/response bodies (`gemini`)

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;
pub mod inventory;

pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, Part};
pub use inventory::{Server, ServerStatus, Summary};
