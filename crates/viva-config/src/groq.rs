//! Groq (OpenAI-compatible chat completions) configuration.

use serde::{Deserialize, Serialize};

use crate::credentials::usable_key;

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroqConfig {
    /// API key. Also read from the legacy `GROQ_API_KEY` variable.
    #[serde(default)]
    pub api_key: String,

    /// Chat model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl GroqConfig {
    /// Check if a real (non-placeholder) API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// The screened API key.
    pub fn api_key(&self) -> Option<&str> {
        usable_key(&self.api_key)
    }
}
