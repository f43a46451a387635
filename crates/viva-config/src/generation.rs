//! Generation constants shared by every provider call.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_tokens() -> u32 {
    300
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_attempt_timeout_secs() -> u64 {
    20
}

fn default_provider_order() -> Vec<String> {
    vec!["groq".to_string(), "gemini".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Output token budget per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on a single provider attempt, in seconds.
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// Providers to probe, highest priority first.
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            provider_order: default_provider_order(),
        }
    }
}

impl GenerationConfig {
    /// Reject values no provider would accept.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "generation.max_tokens".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "generation.temperature".into(),
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        if self.attempt_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "generation.attempt_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
