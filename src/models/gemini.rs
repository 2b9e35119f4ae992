// Gemini generateContent API type definitions
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Gemini generate content request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; a single user turn for this client.
    pub contents: Vec<Content>,

    /// Generation parameters (temperature, max tokens, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying `prompt` as user text.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: None,
        }
    }
}

/// Content in a turn (user or model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default = "default_role")]
    pub role: String, // "user" or "model"
    #[serde(default)]
    pub parts: Vec<Part>,
}

fn default_role() -> String {
    "model".to_string()
}

/// Individual part of content. Only text parts are produced or consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Gemini response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, empty when there is none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Response candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the input prompt.
    #[serde(default)]
    pub prompt_token_count: Option<u32>,

    /// Tokens in the generated response.
    #[serde(default)]
    pub candidates_token_count: Option<u32>,

    /// Total tokens (prompt + candidates).
    #[serde(default)]
    pub total_token_count: Option<u32>,
}
