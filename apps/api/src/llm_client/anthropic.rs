//! Primary provider: Anthropic Messages API.
//!
//! Model is hardcoded to keep assistant behaviour from drifting between deploys.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{api_error, http_client, non_empty, ChatMessage, ChatProvider, LlmError, Role, MAX_TOKENS};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            url: ANTHROPIC_API_URL.to_string(),
        })
    }
}

/// The Messages API requires the conversation to open with a user turn.
fn leading_user_turn(messages: &[ChatMessage]) -> &[ChatMessage] {
    let start = messages
        .iter()
        .position(|m| m.role == Role::User)
        .unwrap_or(messages.len());
    &messages[start..]
}

fn parse_reply(body: &str) -> Result<String, LlmError> {
    let response: AnthropicResponse = serde_json::from_str(body)?;
    if let Some(usage) = &response.usage {
        debug!(
            "Anthropic call succeeded: input_tokens={}, output_tokens={}",
            usage.input_tokens, usage.output_tokens
        );
    }
    non_empty(response.text())
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let messages = leading_user_turn(messages);
        if messages.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages,
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_first_text_block() {
        let body = r#"{
            "content": [
                {"type": "thinking", "text": null},
                {"type": "text", "text": "  Try the Resume Builder at /resume-builder. "}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 12}
        }"#;
        assert_eq!(
            parse_reply(body).unwrap(),
            "Try the Resume Builder at /resume-builder."
        );
    }

    #[test]
    fn test_parse_reply_without_text_is_empty_content() {
        let body = r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#;
        assert!(matches!(parse_reply(body), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_parse_reply_invalid_json() {
        assert!(matches!(parse_reply("not json"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_leading_user_turn_skips_assistant_openers() {
        let messages = vec![
            ChatMessage {
                role: Role::Assistant,
                content: "Hi! How can I help?".to_string(),
            },
            ChatMessage::user("find jobs"),
        ];
        let trimmed = leading_user_turn(&messages);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed[0].role, Role::User);
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![ChatMessage::user("hello")];
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: "sys",
            messages: &messages,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["system"], "sys");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["model"], MODEL);
    }
}
