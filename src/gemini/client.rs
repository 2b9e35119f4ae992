// Gemini generateContent client
// Author: kelexine (https://github.com/kelexine)

use super::TextCompletion;
use crate::config::GeminiConfig;
use crate::error::{ChatbotError, Result};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};
use zeroize::Zeroizing;

/// Client for the Generative Language `generateContent` API.
///
/// Authenticates with an API key sent in the `x-goog-api-key` header. The key
/// is wiped from memory when the client is dropped.
pub struct GeminiClient {
    http_client: Client,
    api_key: Zeroizing<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, api_key: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| ChatbotError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: Zeroizing::new(api_key.to_string()),
            model: config.model.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Call `generateContent` and decode the response.
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = self.endpoint();
        debug!("Calling generateContent API for model: {}", self.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ChatbotError::TextGen(sanitize(&format!("HTTP error: {}", e))))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ChatbotError::TextGen(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = Self::extract_error_message(&response_text)
                .unwrap_or_else(|| response_text.clone());
            let message = sanitize(&message);
            error!("Gemini API error: HTTP {} - {}", status, message);
            return Err(ChatbotError::TextGen(format!("HTTP {}: {}", status, message)));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            ChatbotError::TextGen(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        serde_json::from_str::<ErrorResponse>(response_text)
            .ok()
            .and_then(|resp| resp.error)
            .and_then(|error| error.message.or(error.status))
    }

    /// Send a minimal "Hello" request to verify the key and model.
    pub async fn check_connectivity(&self) -> Result<Duration> {
        let start = Instant::now();
        let mut request = GenerateContentRequest::from_prompt("Hello");
        request.generation_config = Some(GenerationConfig {
            max_output_tokens: Some(16),
            temperature: None,
        });

        self.generate(&request).await?;

        let elapsed = start.elapsed();
        debug!("Gemini connectivity check passed in {:?}", elapsed);
        Ok(elapsed)
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let response = self
            .generate(&GenerateContentRequest::from_prompt(prompt))
            .await?;
        Ok(response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            api_base_url: base_url.to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_endpoint_layout() {
        let client = GeminiClient::new(&config("https://example.test/v1beta/"), "k").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            GeminiClient::extract_error_message(body).as_deref(),
            Some("API key not valid")
        );
        assert_eq!(GeminiClient::extract_error_message("not json"), None);
    }

    #[tokio::test]
    async fn test_generate_content_returns_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "secret-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"All good."}]}}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config(&server.url()), "secret-key").unwrap();
        let text = client.generate_content("status?").await.unwrap();
        assert_eq!(text, "All good.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_maps_to_text_gen() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .with_status(403)
            .with_body(r#"{"error":{"message":"Permission denied"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&config(&server.url()), "bad").unwrap();
        let err = client.check_connectivity().await.unwrap_err();
        assert!(matches!(err, ChatbotError::TextGen(ref m) if m.contains("Permission denied")));
    }
}
