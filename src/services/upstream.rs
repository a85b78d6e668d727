use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::conversation::{Conversation, Turn};

/// Generation settings applied to every attempt. Constant for the lifetime of a service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    RateLimited,
    Overloaded,
    ModelUnavailable,
    InvalidRequest,
    Unknown,
}

/// A failed upstream call, classified once at the client boundary.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: classify(status, &message),
            status,
            message,
        }
    }

    pub fn mentions_vision(&self) -> bool {
        self.message.to_lowercase().contains("vision")
    }

    fn from_response(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.code {
                Some(code) => format!("{} ({})", envelope.error.message, code),
                None => envelope.error.message,
            },
            Err(_) => body.trim().to_string(),
        };
        Self::new(Some(status), format!("HTTP {}: {}", status, detail))
    }

    /// Transport failures never classify from their text, which would otherwise
    /// carry the request url. Without a status they are always `Unknown`.
    fn from_transport(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let kind = match status {
            Some(code) => classify(Some(code), ""),
            None => UpstreamErrorKind::Unknown,
        };
        let cause = if err.is_timeout() {
            "timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        Self {
            kind,
            status,
            message: format!("transport error ({}): {}", cause, err.without_url()),
        }
    }
}

/// Maps a status code and error text to a kind. Text markers are matched
/// case-insensitively so errors without a status still classify.
pub fn classify(status: Option<u16>, message: &str) -> UpstreamErrorKind {
    let text = message.to_lowercase();

    if text.contains("model_decommissioned") {
        return UpstreamErrorKind::ModelUnavailable;
    }
    if status == Some(429)
        || ["429", "rate limit", "rate_limit"]
            .iter()
            .any(|marker| text.contains(marker))
    {
        return UpstreamErrorKind::RateLimited;
    }
    if status == Some(503) || text.contains("overloaded") {
        return UpstreamErrorKind::Overloaded;
    }
    if status == Some(404) || text.contains("not found") || text.contains("model_not_found") {
        return UpstreamErrorKind::ModelUnavailable;
    }
    if status == Some(400) || text.contains("400") {
        return UpstreamErrorKind::InvalidRequest;
    }
    UpstreamErrorKind::Unknown
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Issues exactly one chat-completion request and returns the first choice's text.
    async fn create_chat_completion(
        &self,
        model: &str,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// OpenAI-compatible chat-completion client for the Groq API.
pub struct GroqClient {
    http: reqwest::Client,
    api_base: String,
    api_key: SecretString,
}

impl GroqClient {
    pub fn new(api_base: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletionClient for GroqClient {
    async fn create_chat_completion(
        &self,
        model: &str,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<String, UpstreamError> {
        let request = ChatCompletionRequest {
            model,
            messages: conversation.turns(),
            max_tokens: params.max_output_tokens,
            temperature: params.temperature,
        };

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(UpstreamError::from_transport)?;

        if !status.is_success() {
            return Err(UpstreamError::from_response(status.as_u16(), &body));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            UpstreamError::new(None, format!("invalid completion payload: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| UpstreamError::new(None, "completion contained no message content"))
    }
}
