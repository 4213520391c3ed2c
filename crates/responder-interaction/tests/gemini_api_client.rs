//! GeminiApiClient against a local mock endpoint.

use mockito::Matcher;
use responder_core::generation::{
    GenerationClient, GenerationError, GenerationOptions, GenerationRequest, ModelId,
};
use responder_core::prompt::ComposedPrompt;
use responder_interaction::GeminiApiClient;
use serde_json::json;

fn request(model: ModelId, use_search: bool) -> GenerationRequest {
    GenerationRequest::new(
        ComposedPrompt {
            system_instruction: "You are Gordhan Das.".to_string(),
            user_prompt: "This is the first message from the client.".to_string(),
        },
        &GenerationOptions {
            model,
            use_search,
            ..GenerationOptions::default()
        },
    )
}

#[tokio::test]
async fn test_successful_generation_with_search() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/gemini-2\.5-flash:generateContent".to_string()))
        .match_header("x-goog-api-key", "test-key")
        .match_query(Matcher::Missing)
        .match_body(Matcher::PartialJson(json!({
            "tools": [{"googleSearch": {}}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {"parts": [{"text": "Happy to help!"}]},
                    "groundingMetadata": {"groundingChunks": [
                        {"web": {"uri": "https://example.com", "title": "Example"}},
                        {"web": {"uri": "https://example.com", "title": "Example"}}
                    ]}
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GeminiApiClient::new().with_base_url(server.url());
    let output = client
        .generate("test-key", request(ModelId::Flash, true))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(output.text, "Happy to help!");
    assert_eq!(output.citations.len(), 1);
}

#[tokio::test]
async fn test_invalid_key_is_classified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Any)
        .with_status(400)
        .with_body(
            json!({"error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }})
            .to_string(),
        )
        .create_async()
        .await;

    let client = GeminiApiClient::new().with_base_url(server.url());
    let err = client
        .generate("bad-key", request(ModelId::Pro, false))
        .await
        .unwrap_err();
    assert_eq!(err, GenerationError::InvalidApiKey);
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Any)
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let client = GeminiApiClient::new().with_base_url(server.url());
    let err = client
        .generate("k", request(ModelId::FlashLite, false))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::ServerError(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    // Port 9 (discard) on loopback is expected to refuse connections.
    let client = GeminiApiClient::new().with_base_url("http://127.0.0.1:9");
    let err = client
        .generate("k", request(ModelId::Flash, false))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Network(_)));
}

#[tokio::test]
async fn test_api_key_stays_out_of_transport_errors() {
    let client = GeminiApiClient::new().with_base_url("http://127.0.0.1:9/v1beta/models");
    let err = client
        .generate("SECRET-KEY-123", request(ModelId::Flash, false))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Network(_)));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
    assert!(!err.user_message().contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn test_api_key_stays_out_of_parse_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = GeminiApiClient::new().with_base_url(server.url());
    let err = client
        .generate("SECRET-KEY-123", request(ModelId::Flash, false))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Unknown(_)));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
    assert!(!err.user_message().contains("SECRET-KEY-123"));
}
