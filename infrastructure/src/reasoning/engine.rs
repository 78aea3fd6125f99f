//! OpenAI-compatible chat completions adapter for [`ReasoningEngine`].

use super::parser::parse_action;
use super::prompt::build_messages;
use super::provider::{ProviderSettings, ProviderSetupError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use toolpilot_application::{ReasoningContext, ReasoningEngine, ReasoningError, ReasoningStep};
use toolpilot_domain::Message;
use tracing::{debug, error};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Reasoning engine backed by a `/chat/completions` endpoint.
pub struct ChatCompletionsEngine {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl ChatCompletionsEngine {
    pub fn new(settings: ProviderSettings) -> Result<Self, ProviderSetupError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderSetupError::HttpClient(e.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    async fn complete(&self, messages: &[Message]) -> Result<String, ReasoningError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages,
            temperature: self.settings.temperature,
        };

        debug!(
            model = %self.settings.model,
            base_url = %self.settings.base_url,
            messages = messages.len(),
            "Requesting chat completion"
        );

        let mut request = self.client.post(self.settings.completions_url());
        if let Some(api_key) = &self.settings.api_key {
            let mut auth_value =
                reqwest::header::HeaderValue::try_from(format!("Bearer {}", api_key)).map_err(
                    |e| ReasoningError::Transport(format!("Invalid API key characters: {}", e)),
                )?;
            auth_value.set_sensitive(true);
            request = request.header(reqwest::header::AUTHORIZATION, auth_value);
        }

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| ReasoningError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Chat completion request failed");
            return Err(ReasoningError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ReasoningError::Transport(format!("Invalid response body: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ReasoningError::Transport("No content in response".to_string()))
    }
}

impl std::fmt::Debug for ChatCompletionsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsEngine")
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait]
impl ReasoningEngine for ChatCompletionsEngine {
    async fn next_step(
        &self,
        context: ReasoningContext<'_>,
    ) -> Result<ReasoningStep, ReasoningError> {
        let messages = build_messages(&context);
        let reply = self.complete(&messages).await?;
        debug!("Engine reply: {}", reply);
        parse_action(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::ProviderKind;
    use std::time::Duration;
    use toolpilot_domain::builtin_tool_spec;

    fn settings(base_url: &str) -> ProviderSettings {
        ProviderSettings {
            kind: ProviderKind::Ollama,
            model: "test-model".to_string(),
            base_url: base_url.to_string(),
            api_key: None,
            temperature: 0.0,
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::system("s"), Message::user("u")];
        let body = ChatRequest {
            model: "m",
            messages: &messages,
            temperature: 0.0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"hi"}}]}"#;
        let response: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let engine = ChatCompletionsEngine::new(settings("http://127.0.0.1:9/v1")).unwrap();
        let spec = builtin_tool_spec();
        let context = ReasoningContext {
            input: "hello",
            history: &[],
            scratchpad: &[],
            tools: &spec,
        };

        let err = engine.next_step(context).await.unwrap_err();
        assert!(matches!(err, ReasoningError::Transport(_)));
    }
}
