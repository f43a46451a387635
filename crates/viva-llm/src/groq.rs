//! Groq client (OpenAI-compatible chat completions).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use viva_config::GroqConfig;

use crate::http::check_response;
use crate::provider::{GenerationProvider, GenerationRequest};
use crate::ProviderError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions provider for Groq.
pub struct GroqProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqProvider {
    /// Build a provider from config, or `None` if no usable key is set.
    #[must_use]
    pub fn from_config(config: &GroqConfig, http: reqwest::Client) -> Option<Self> {
        let api_key = config.api_key()?.to_string();
        Some(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// `[system, ...history, user]` in chat-completion roles.
fn build_messages<'a>(request: &GenerationRequest<'a>) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    messages.push(ChatMessage {
        role: "system",
        content: request.system_prompt,
    });
    messages.extend(request.history.iter().map(|turn| ChatMessage {
        role: turn.speaker.role(),
        content: &turn.text,
    }));
    messages.push(ChatMessage {
        role: "user",
        content: request.user_message,
    });
    messages
}

fn extract_text(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl GenerationProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: build_messages(request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, turns = request.history.len(), "groq request");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        extract_text(data).ok_or_else(|| ProviderError::EmptyResponse(self.name().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use viva_core::ConversationTurn;

    use super::*;

    const FIXTURE: &str = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "  What happens when low equals high?  "}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 120, "completion_tokens": 9, "total_tokens": 129}
    }"#;

    #[test]
    fn messages_wrap_history_in_order() {
        let history = vec![
            ConversationTurn::tutor("Share your code."),
            ConversationTurn::student("def f(): pass"),
        ];
        let request = GenerationRequest {
            system_prompt: "SYS",
            history: &history,
            user_message: "what now?",
            max_tokens: 300,
            temperature: 0.7,
        };
        let roles: Vec<&str> = build_messages(&request).iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "assistant", "user", "user"]);
        assert_eq!(build_messages(&request)[3].content, "what now?");
    }

    #[test]
    fn request_body_shape() {
        let request = GenerationRequest {
            system_prompt: "SYS",
            history: &[],
            user_message: "hi",
            max_tokens: 300,
            temperature: 0.5,
        };
        let body = ChatRequest {
            model: "llama-3.3-70b-versatile",
            messages: build_messages(&request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn parse_fixture() {
        let data: ChatResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(
            extract_text(data).as_deref(),
            Some("What happens when low equals high?")
        );
    }

    #[test]
    fn blank_content_is_empty() {
        let data: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "   "}}]}"#).unwrap();
        assert!(extract_text(data).is_none());
        let data: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(extract_text(data).is_none());
    }

    #[test]
    fn unconfigured_key_yields_none() {
        let config = GroqConfig {
            api_key: "your_groq_api_key_here".into(),
            ..GroqConfig::default()
        };
        assert!(GroqProvider::from_config(&config, reqwest::Client::new()).is_none());
    }
}
