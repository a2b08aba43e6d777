use std::time::Duration;

use serde::{Deserialize, Serialize};
use vigil_core::{LlmConfig, VigilError};

/// One role-tagged message of the review request.
///
/// A review sends exactly two of these: the reviewer persona as
/// [`Role::System`] and the diff as [`Role::User`].
///
/// # Examples
///
/// ```
/// use vigil_review::llm::{ChatMessage, Role};
///
/// let msg = ChatMessage {
///     role: Role::User,
///     content: "```diff\n+added line\n```".into(),
/// };
/// assert!(msg.content.contains("+added line"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: Role,
    /// Text content of the message.
    pub content: String,
}

/// Message role, serialized in the endpoint's lowercase wire form.
///
/// # Examples
///
/// ```
/// use vigil_review::llm::Role;
///
/// assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Reviewer persona instructions.
    System,
    /// The diff under review.
    User,
    /// A model reply.
    Assistant,
}

/// Chat completions client for Open WebUI and other OpenAI-compatible
/// providers exposing `/api/chat/completions`.
///
/// # Examples
///
/// ```
/// use vigil_core::LlmConfig;
/// use vigil_review::llm::LlmClient;
///
/// let config = LlmConfig {
///     api_key: Some("test-key".into()),
///     ..LlmConfig::default()
/// };
/// let client = LlmClient::new(&config).unwrap();
/// ```
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a new LLM client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Llm`] if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, VigilError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| VigilError::Llm(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Return the model name from the configuration.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a single non-streaming chat completion request and return the
    /// text of the first choice.
    ///
    /// Posts to `{base_url}/api/chat/completions` with a bearer token and the
    /// JSON body `{model, messages, stream: false}`.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Llm`] on transport errors, non-success status
    /// codes, or a response body without `choices[0].message.content`, and
    /// [`VigilError::Serialization`] when the body is not JSON at all.
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, VigilError> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or("http://localhost:3000");
        let url = format!("{}/api/chat/completions", base_url.trim_end_matches('/'));

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "stream": false,
        });

        let mut request = self.client.post(&url);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {api_key}"));
        }
        request = request.header("Content-Type", "application/json");

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| VigilError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(VigilError::Llm(format!(
                "LLM API error {status}: {body_text}"
            )));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| VigilError::Llm(format!("failed to read response: {e}")))?;
        let response_body: serde_json::Value = serde_json::from_str(&body_text)?;

        let content = response_body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                VigilError::Llm(format!("unexpected response structure: {response_body}"))
            })?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_construction_succeeds() {
        let config = LlmConfig::default();
        let client = LlmClient::new(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn model_returns_config_model() {
        let config = LlmConfig {
            model: "gpt-4o-mini".into(),
            ..LlmConfig::default()
        };
        let client = LlmClient::new(&config).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn chat_message_serializes_in_wire_form() {
        let msg = ChatMessage {
            role: Role::User,
            content: "+added line".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "+added line");
    }
}
