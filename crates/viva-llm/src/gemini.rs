//! Gemini client (`generateContent`).
//!
//! Gemini receives a single flattened text prompt rather than role-tagged
//! messages: the system prompt, a blank line, the history as `Label: text`
//! lines, then the new student message and an open `Tutor:` cue.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use viva_config::GeminiConfig;
use viva_core::transcript::render_transcript;

use crate::http::check_response;
use crate::provider::{GenerationProvider, GenerationRequest};
use crate::ProviderError;

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

/// `generateContent` provider for Google Gemini.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Build a provider from config, or `None` if no usable key is set.
    #[must_use]
    pub fn from_config(config: &GeminiConfig, http: reqwest::Client) -> Option<Self> {
        let api_key = config.api_key()?.to_string();
        Some(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Flatten a request into the single prompt Gemini receives.
#[must_use]
pub fn flatten_prompt(request: &GenerationRequest<'_>) -> String {
    let mut prompt = String::with_capacity(request.system_prompt.len() + 256);
    prompt.push_str(request.system_prompt);
    prompt.push_str("\n\n");
    prompt.push_str(&render_transcript(request.history));
    prompt.push_str("Student: ");
    prompt.push_str(request.user_message);
    prompt.push_str("\nTutor:");
    prompt
}

fn build_body(request: &GenerationRequest<'_>) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(flatten_prompt(request)),
            }],
        }],
        safety_settings: HARM_CATEGORIES
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold: "BLOCK_NONE",
            })
            .collect(),
        generation_config: GenerationConfig {
            max_output_tokens: request.max_tokens,
            temperature: request.temperature,
        },
    }
}

fn extract_text(response: GeminiResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, turns = request.history.len(), "gemini request");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_body(request))
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let data: GeminiResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        extract_text(data).ok_or_else(|| ProviderError::EmptyResponse(self.name().to_string()))
    }
}
