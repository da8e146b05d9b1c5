use crate::core::{AgentRequest, GroupingResponse, ModelInvoker};
use crate::utils::error::{MatchmakerError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for the Gemini `generateContent` endpoint with a JSON response schema.
///
/// Exactly one request per call; failures are returned to the caller as-is.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl ModelInvoker for GeminiClient {
    async fn generate(&self, request: &AgentRequest) -> Result<GroupingResponse> {
        let url = self.endpoint(&request.model);
        let body = GenerateContentRequest::from_agent(request);

        tracing::debug!("Calling model {} at {}", request.model, url);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model response status: {}", status);
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(MatchmakerError::ModelResponseError {
                message: format!("HTTP {}: {}", status, text),
            });
        }

        let payload: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| MatchmakerError::ModelResponseError {
                    message: format!("malformed response envelope: {}", e),
                })?;
        let text = payload.first_text().ok_or_else(|| MatchmakerError::ModelResponseError {
            message: "response contained no candidate text".to_string(),
        })?;

        let groups: GroupingResponse =
            serde_json::from_str(text).map_err(|e| MatchmakerError::ModelResponseError {
                message: format!("groups do not match the response schema: {}", e),
            })?;
        tracing::info!("🤝 Model suggested {} groups", groups.groups.len());
        Ok(groups)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn from_agent(request: &AgentRequest) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(request.instruction.clone()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.message.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.output_schema.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::PromptAssembler;
    use crate::core::AttendeeRecord;
    use httpmock::prelude::*;

    fn request() -> AgentRequest {
        let roster = vec![AttendeeRecord {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            interests: "ML".to_string(),
            looking_to_connect_with: "engineers".to_string(),
        }];
        PromptAssembler::assemble(&roster, "gemini-2.0-flash", "Please group us")
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_agent(&request())).unwrap();

        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("- Alice (alice@x.com)"));
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Please group us");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost:1234/v1beta/", "key", 5).unwrap();
        assert_eq!(
            client.endpoint("gemini-2.0-flash"),
            "http://localhost:1234/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_decodes_structured_text() {
        let server = MockServer::start();
        let groups = r#"{"groups":[{"members":["Alice"],"description":"ML fans"}]}"#;

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.0-flash:generateContent")
                .header("x-goog-api-key", "test-key")
                .body_contains("responseSchema");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": groups}]},
                        "finishReason": "STOP"
                    }]
                }));
        });

        let client = GeminiClient::new(&server.base_url(), "test-key", 5).unwrap();
        let response = client.generate(&request()).await.unwrap();

        api_mock.assert();
        assert_eq!(response.groups.len(), 1);
        assert_eq!(response.groups[0].members, vec!["Alice"]);
    }

    #[tokio::test]
    async fn test_generate_reports_http_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(403).body("API key not valid");
        });

        let client = GeminiClient::new(&server.base_url(), "bad-key", 5).unwrap();
        let result = client.generate(&request()).await;

        api_mock.assert();
        match result {
            Err(MatchmakerError::ModelResponseError { message }) => {
                assert!(message.contains("403"));
                assert!(message.contains("API key not valid"));
            }
            other => panic!("expected model response error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_without_candidates_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(serde_json::json!({"candidates": []}));
        });

        let client = GeminiClient::new(&server.base_url(), "key", 5).unwrap();
        assert!(matches!(
            client.generate(&request()).await,
            Err(MatchmakerError::ModelResponseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_rejects_off_schema_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "{\"teams\": []}"}]}}]
            }));
        });

        let client = GeminiClient::new(&server.base_url(), "key", 5).unwrap();
        let err = client.generate(&request()).await.unwrap_err();
        assert!(matches!(err, MatchmakerError::ModelResponseError { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_envelope() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200)
                .header("Content-Type", "application/json")
                .body("not json at all");
        });

        let client = GeminiClient::new(&server.base_url(), "key", 5).unwrap();
        let err = client.generate(&request()).await.unwrap_err();
        match &err {
            MatchmakerError::ModelResponseError { message } => {
                assert!(message.contains("malformed response envelope"))
            }
            other => panic!("expected model response error, got {:?}", other),
        }
        assert_eq!(err.exit_code(), 2);
    }
}
