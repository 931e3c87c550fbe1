use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{config::Config, errors::GenerationError};

/// One outbound generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub thinking_budget: Option<u32>,
    pub response_mime_type: Option<String>,
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            thinking_budget: None,
            response_mime_type: None,
            max_output_tokens: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.response_mime_type = Some(mime_type.into());
        self
    }

    pub fn with_max_output_tokens(mut self, max_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_tokens);
        self
    }
}

/// The external text-generation model.
///
/// `Ok(None)` means the call succeeded but the model produced no text
/// (safety filtering, empty completion).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, GenerationError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<ContentBody<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ContentBody<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfigBody<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartBody<'a>>,
}

#[derive(Debug, Serialize)]
struct PartBody<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfigBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfigBody {
    thinking_budget: u32,
}

impl<'a> From<&'a GenerateRequest> for GenerateContentBody<'a> {
    fn from(request: &'a GenerateRequest) -> Self {
        let generation_config = GenerationConfigBody {
            response_mime_type: request.response_mime_type.as_deref(),
            max_output_tokens: request.max_output_tokens,
            thinking_config: request
                .thinking_budget
                .map(|thinking_budget| ThinkingConfigBody { thinking_budget }),
        };
        let has_generation_config = generation_config.response_mime_type.is_some()
            || generation_config.max_output_tokens.is_some()
            || generation_config.thinking_config.is_some();

        GenerateContentBody {
            contents: vec![ContentBody {
                role: Some("user"),
                parts: vec![PartBody {
                    text: &request.prompt,
                }],
            }],
            system_instruction: request.system_instruction.as_deref().map(|text| ContentBody {
                role: None,
                parts: vec![PartBody { text }],
            }),
            generation_config: has_generation_config.then_some(generation_config),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

impl GenerateContentResponse {
    /// Joined answer text of the first candidate, skipping thought summaries.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the Generative Language `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_http_client(
            reqwest::Client::new(),
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
        )
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: SecretString,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, GenerationError> {
        let api_key = self.api_key.expose_secret();
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        log::debug!(
            "Calling model {} (prompt {} chars, thinking budget {:?})",
            request.model,
            request.prompt.len(),
            request.thinking_budget
        );

        let response = self
            .http
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentBody::from(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        format!("Model service returned HTTP {}", status.as_u16())
                    } else {
                        body
                    }
                });
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        Ok(body.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::with_http_client(
            reqwest::Client::new(),
            server.base_url(),
            SecretString::from("test-key".to_string()),
        )
    }

    #[test]
    fn request_body_omits_unset_options() {
        let request = GenerateRequest::new("gemini-2.5-flash", "Hello");
        let body = serde_json::to_value(GenerateContentBody::from(&request)).unwrap();

        assert_eq!(
            body,
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "Hello" }] }] })
        );
    }

    #[test]
    fn request_body_carries_generation_options() {
        let request = GenerateRequest::new("gemini-2.5-flash", "Hello")
            .with_system_instruction("You are a pirate")
            .with_thinking_budget(2048)
            .with_response_mime_type("application/json")
            .with_max_output_tokens(1000);
        let body = serde_json::to_value(GenerateContentBody::from(&request)).unwrap();

        assert_eq!(body["systemInstruction"], json!({ "parts": [{ "text": "You are a pirate" }] }));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
        assert_eq!(body["generationConfig"]["thinkingConfig"]["thinkingBudget"], 2048);
    }

    #[test]
    fn response_text_skips_thought_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "Hello " },
                    { "text": "world" }
                ]}
            }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert_eq!(blocked.text(), None);

        let no_content: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] }))
                .unwrap();
        assert_eq!(no_content.text(), None);
    }

    #[tokio::test]
    async fn generate_posts_to_model_endpoint_with_api_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .json_body(json!({
                        "contents": [{ "role": "user", "parts": [{ "text": "Hi" }] }]
                    }));
                then.status(200).json_body(json!({
                    "candidates": [{ "content": { "role": "model", "parts": [{ "text": "Hello!" }] } }]
                }));
            })
            .await;

        let text = client_for(&server)
            .generate(GenerateRequest::new("gemini-2.5-flash", "Hi"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text.as_deref(), Some("Hello!"));
    }

    #[tokio::test]
    async fn generate_maps_api_error_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(403).json_body(json!({
                    "error": { "code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED" }
                }));
            })
            .await;

        let err = client_for(&server)
            .generate(GenerateRequest::new("gemini-2.5-flash", "Hi"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::Api {
                status: 403,
                message: "API key not valid.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn generate_uses_raw_body_for_non_json_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(502).body("Bad Gateway");
            })
            .await;

        let err = client_for(&server)
            .generate(GenerateRequest::new("gemini-2.5-flash", "Hi"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::Api {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[tokio::test]
    async fn generate_describes_empty_error_body_by_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(503);
            })
            .await;

        let err = client_for(&server)
            .generate(GenerateRequest::new("gemini-2.5-flash", "Hi"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::Api {
                status: 503,
                message: "Model service returned HTTP 503".to_string()
            }
        );
    }

    #[tokio::test]
    async fn generate_reports_undecodable_success_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server)
            .generate(GenerateRequest::new("gemini-2.5-flash", "Hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[tokio::test]
    async fn generate_without_api_key_sends_nothing() {
        let client = GeminiClient::with_http_client(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            SecretString::from(String::new()),
        );

        let err = client
            .generate(GenerateRequest::new("gemini-2.5-flash", "Hi"))
            .await
            .unwrap_err();

        assert_eq!(err, GenerationError::MissingApiKey);
    }
}
