//! Google Gemini (`generateContent`) configuration.

use serde::{Deserialize, Serialize};

use crate::credentials::usable_key;

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key. Also read from the legacy `GEMINI_API_KEY` variable.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL; `/models/{model}:generateContent` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn api_key(&self) -> Option<&str> {
        usable_key(&self.api_key)
    }
}
