//! LLM client: the single point of entry for every model call the assistant makes.
//!
//! No other module may talk to a provider API directly. Handlers go through
//! `FallbackChat`, which owns the primary and secondary `ChatProvider`s.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod anthropic;
pub mod fallback;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use fallback::FallbackChat;
pub use openai::OpenAiCompatProvider;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_TOKENS: u32 = 600;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("all providers failed (primary: {primary}; secondary: {secondary})")]
    Exhausted { primary: String, secondary: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Accepts only the roles a browser may legitimately send back.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat-completion backend. Implement this to add a provider without
/// touching the assistant service or handlers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

fn http_client() -> Result<reqwest::Client, LlmError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// Maps a non-success response to `LlmError::Api`, preferring the provider's
/// own error message when the body carries one.
async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);
    LlmError::Api { status, message }
}

fn non_empty(text: Option<&str>) -> Result<String, LlmError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(LlmError::EmptyContent),
    }
}
