//! GeminiApiClient - Direct REST API implementation of [`GenerationClient`].
//!
//! Calls `models/{model}:generateContent` with the composed system
//! instruction and prompt, optionally enabling Google Search grounding and a
//! thinking budget.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use responder_core::conversation::SearchResult;
use responder_core::generation::{
    GenerationClient, GenerationError, GenerationOutput, GenerationRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Header carrying the API key, which keeps it out of URLs and error text.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    base_url: String,
}

impl Default for GeminiApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiApiClient {
    /// Creates a client against the public endpoint.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the models endpoint (e.g. a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    async fn send_request(
        &self,
        api_key: &str,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let url = format!("{}/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        response.json().await.map_err(|err| {
            GenerationError::Unknown(format!(
                "Failed to parse Gemini response: {}",
                err.without_url()
            ))
        })
    }
}

#[async_trait]
impl GenerationClient for GeminiApiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        api_key: &str,
        request: GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let model = request.model.as_str();
        let body = GenerateContentRequest::from(&request);
        debug!(
            model,
            use_search = request.use_search,
            thinking_budget = ?request.thinking_budget,
            "Sending Gemini request"
        );

        let response = self.send_request(api_key, model, &body).await?;
        extract_output(response)
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        let tools = if request.use_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self {
            system_instruction: Content::text(None, &request.system_instruction),
            contents: vec![Content::text(Some("user"), &request.prompt)],
            tools,
            generation_config: request.thinking_budget.map(|thinking_budget| GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget },
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

// ============================================================================
// Response and error mapping
// ============================================================================

/// Joins the first candidate's text parts and collects its web citations.
fn extract_output(response: GenerateContentResponse) -> Result<GenerationOutput, GenerationError> {
    let candidate = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .ok_or(GenerationError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let citations = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter_map(|web| {
                    let uri = web.uri?;
                    let title = web.title.unwrap_or_else(|| uri.clone());
                    Some(SearchResult { uri, title })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(GenerationOutput::new(text, citations))
}

/// The URL is stripped from the message so endpoint details never reach logs.
fn map_transport_error(err: reqwest::Error) -> GenerationError {
    let is_network = err.is_connect() || err.is_timeout() || err.is_request();
    let message = format!("Gemini API request failed: {}", err.without_url());
    if is_network {
        GenerationError::Network(message)
    } else {
        GenerationError::classify(None, message)
    }
}

fn map_http_error(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    GenerationError::classify(Some(status.as_u16()), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use responder_core::generation::{GenerationOptions, ModelId};
    use responder_core::prompt::ComposedPrompt;
    use serde_json::json;

    fn request(model: ModelId, use_search: bool) -> GenerationRequest {
        GenerationRequest::new(
            ComposedPrompt {
                system_instruction: "You are Ana.".to_string(),
                user_prompt: "Draft a reply.".to_string(),
            },
            &GenerationOptions {
                model,
                use_search,
                ..GenerationOptions::default()
            },
        )
    }

    #[test]
    fn test_request_body_for_flash_without_search() {
        let body = serde_json::to_value(GenerateContentRequest::from(&request(ModelId::Flash, false))).unwrap();
        assert_eq!(
            body,
            json!({
                "systemInstruction": {"parts": [{"text": "You are Ana."}]},
                "contents": [{"role": "user", "parts": [{"text": "Draft a reply."}]}]
            })
        );
    }

    #[test]
    fn test_request_body_for_pro_with_search() {
        let body = serde_json::to_value(GenerateContentRequest::from(&request(ModelId::Pro, true))).unwrap();
        assert_eq!(body["tools"], json!([{"googleSearch": {}}]));
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            json!(32768)
        );
    }

    #[test]
    fn test_extract_output_joins_parts_and_dedups_citations() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "Hello "},
                    {"text": "there."}
                ]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a", "title": "A"}},
                    {"web": {"uri": "https://b", "title": "B"}},
                    {"web": {"uri": "https://a", "title": "A again"}},
                    {"retrievedContext": {}}
                ]}
            }]
        }))
        .unwrap();

        let output = extract_output(response).unwrap();
        assert_eq!(output.text, "Hello there.");
        let uris: Vec<_> = output.citations.iter().map(|c| c.uri.as_str()).collect();
        assert_eq!(uris, vec!["https://a", "https://b"]);
        assert_eq!(output.citations[0].title, "A");
    }

    #[test]
    fn test_extract_output_without_text_is_empty_response() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(extract_output(response).unwrap_err(), GenerationError::EmptyResponse);

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]})).unwrap();
        assert_eq!(extract_output(response).unwrap_err(), GenerationError::EmptyResponse);
    }

    #[test]
    fn test_map_http_error_categories() {
        let invalid_key = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            map_http_error(StatusCode::BAD_REQUEST, invalid_key),
            GenerationError::InvalidApiKey
        );

        let exhausted = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(
            map_http_error(StatusCode::TOO_MANY_REQUESTS, exhausted),
            GenerationError::QuotaExceeded(_)
        ));

        let bad = r#"{"error":{"code":400,"message":"Invalid JSON payload","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            map_http_error(StatusCode::BAD_REQUEST, bad),
            GenerationError::BadRequest(_)
        ));

        assert!(matches!(
            map_http_error(StatusCode::SERVICE_UNAVAILABLE, "upstream down"),
            GenerationError::ServerError(_)
        ));
    }
}
