//! Completion client seam and the Ollama implementation.
//!
//! The trait returns a boxed future so it stays object-safe; the HTTP layer
//! holds it as `Arc<dyn CompletionClient>` and tests swap in the mock.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CompletionError;

/// One completion call: a system prompt, a user prompt, optional inline
/// images (base64-encoded) and an optional JSON schema the output must match.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub images: Vec<String>,
    pub schema: Option<Value>,
}

pub trait CompletionClient: Send + Sync {
    /// Run the completion and return the raw response content.
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<String, CompletionError>>;
}

/// Ollama HTTP client for local inference.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CompletionError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    /// Default local instance, overridable through `OLLAMA_BASE_URL` and
    /// `OLLAMA_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CompletionError> {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());
        let timeout_secs = std::env::var("OLLAMA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);
        Self::new(&base_url, timeout_secs)
    }
}

/// Request body for Ollama /api/chat
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a Value>,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<&'a [String]>,
}

/// Response body from Ollama /api/chat
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

impl CompletionClient for OllamaClient {
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<String, CompletionError>> {
        Box::pin(async move {
            let url = format!("{}/api/chat", self.base_url);
            let images = (!request.images.is_empty()).then_some(request.images.as_slice());
            let body = OllamaChatRequest {
                model: &request.model,
                messages: vec![
                    OllamaMessage {
                        role: "system",
                        content: &request.system,
                        images: None,
                    },
                    OllamaMessage {
                        role: "user",
                        content: &request.prompt,
                        images,
                    },
                ],
                stream: false,
                format: request.schema.as_ref(),
            };

            let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
                if e.is_connect() {
                    CompletionError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    CompletionError::HttpClient(format!(
                        "request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    CompletionError::HttpClient(e.to_string())
                }
            })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(CompletionError::Upstream {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: OllamaChatResponse = response
                .json()
                .await
                .map_err(|e| CompletionError::ResponseParsing(e.to_string()))?;

            if parsed.message.content.trim().is_empty() {
                return Err(CompletionError::EmptyResponse);
            }

            Ok(parsed.message.content)
        })
    }
}

/// Mock completion client for testing. Responses are handed out in order;
/// an `Err` entry simulates an upstream failure for that call.
pub struct MockCompletionClient {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, String>>>,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self::with_responses(vec![Ok(response.to_string())])
    }

    pub fn with_responses(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into_iter().collect()),
        }
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete<'a>(
        &'a self,
        _request: &'a CompletionRequest,
    ) -> BoxFuture<'a, Result<String, CompletionError>> {
        Box::pin(async move {
            let next = self
                .responses
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front();
            match next {
                Some(Ok(response)) => Ok(response),
                Some(Err(message)) => Err(CompletionError::Upstream {
                    status: 500,
                    body: message,
                }),
                None => Err(CompletionError::EmptyResponse),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "medgemma:4b".into(),
            system: "system".into(),
            prompt: "prompt".into(),
            images: vec![],
            schema: None,
        }
    }

    #[tokio::test]
    async fn mock_client_returns_configured_response() {
        let client = MockCompletionClient::new("test response");
        let result = client.complete(&request()).await.unwrap();
        assert_eq!(result, "test response");
    }

    #[tokio::test]
    async fn mock_client_replays_responses_in_order() {
        let client = MockCompletionClient::with_responses(vec![
            Ok("first".into()),
            Err("boom".into()),
            Ok("third".into()),
        ]);
        assert_eq!(client.complete(&request()).await.unwrap(), "first");
        assert!(matches!(
            client.complete(&request()).await,
            Err(CompletionError::Upstream { status: 500, .. })
        ));
        assert_eq!(client.complete(&request()).await.unwrap(), "third");
    }

    #[test]
    fn ollama_client_trims_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", 60).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.timeout_secs, 60);
    }

    #[test]
    fn chat_request_omits_empty_fields() {
        let body = OllamaChatRequest {
            model: "medgemma:4b",
            messages: vec![OllamaMessage {
                role: "user",
                content: "hello",
                images: None,
            }],
            stream: false,
            format: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("format").is_none());
        assert!(json["messages"][0].get("images").is_none());
    }
}
