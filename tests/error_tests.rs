// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use invchat::error::{ApiError, ChatbotError};

#[test]
fn test_api_error_messages_carry_endpoint_and_elapsed() {
    let timeout = ApiError::Timeout {
        endpoint: "/api/summary".to_string(),
        elapsed: 10.0,
    };
    assert_eq!(timeout.to_string(), "API timeout after 10.00s for /api/summary");

    let status = ApiError::Status {
        endpoint: "/api/servers".to_string(),
        status: 503,
        elapsed: 0.25,
    };
    assert_eq!(status.to_string(), "HTTP error 503 after 0.25s for /api/servers");
}

#[test]
fn test_api_error_is_transparent_in_chatbot_error() {
    let err: ChatbotError = ApiError::Decode {
        endpoint: "/api/summary".to_string(),
        reason: "expected value".to_string(),
    }
    .into();
    assert_eq!(
        err.to_string(),
        "Invalid JSON response from /api/summary: expected value"
    );
}

#[test]
fn test_gemini_init_error() {
    let error = ChatbotError::GeminiInit("API key not valid".to_string());
    assert_eq!(
        error.to_string(),
        "Gemini initialization failed: API key not valid"
    );
}

#[test]
fn test_error_status_codes() {
    let cases = vec![
        (ChatbotError::InvalidRequest("empty".to_string()), StatusCode::BAD_REQUEST),
        (ChatbotError::TextGen("boom".to_string()), StatusCode::BAD_GATEWAY),
        (
            ChatbotError::Api(ApiError::Connection {
                endpoint: "/api/summary".to_string(),
                elapsed: 0.1,
            }),
            StatusCode::BAD_GATEWAY,
        ),
        (ChatbotError::Config("bad".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        (ChatbotError::Internal("oops".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        assert_eq!(error.into_response().status(), expected);
    }
}

fn error_type(error: &ChatbotError) -> &'static str {
    // Exhaustive on purpose: a new variant must pick a response category here.
    match error {
        ChatbotError::InvalidRequest(_) => "invalid_request_error",
        ChatbotError::Api(_) => "inventory_error",
        ChatbotError::TextGen(_) | ChatbotError::GeminiInit(_) => "text_generation_error",
        ChatbotError::Config(_) | ChatbotError::ConfigParsing(_) => "configuration_error",
        ChatbotError::Internal(_) => "internal_error",
    }
}

#[tokio::test]
async fn test_response_body_names_error_type() {
    use http_body_util::BodyExt;

    let errors = vec![
        ChatbotError::InvalidRequest("empty".to_string()),
        ChatbotError::GeminiInit("bad key".to_string()),
        ChatbotError::ConfigParsing(config::ConfigError::Message("bad".to_string())),
        ChatbotError::Internal("oops".to_string()),
    ];

    for error in errors {
        let expected = error_type(&error);
        let bytes = error.into_response().into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["type"], expected);
    }
}
