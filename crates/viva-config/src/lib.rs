//! # viva-config
//!
//! Layered configuration loading for Viva using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VIVA_*` prefix, `__` as separator)
//! 2. Legacy provider keys (`GROQ_API_KEY`, `GEMINI_API_KEY`)
//! 3. Project-level `.viva/config.toml`
//! 4. User-level `~/.config/viva/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VIVA_GROQ__API_KEY` -> `groq.api_key`,
//! `VIVA_GENERATION__MAX_TOKENS` -> `generation.max_tokens`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use viva_config::VivaConfig;
//!
//! let config = VivaConfig::load().expect("config");
//!
//! if !config.groq.is_configured() && !config.gemini.is_configured() {
//!     println!("no provider keys: replies come from the offline responder");
//! }
//! ```

mod credentials;
mod error;
mod gemini;
mod generation;
mod groq;
mod knowledge;
mod offline;

pub use credentials::usable_key;
pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use generation::GenerationConfig;
pub use groq::GroqConfig;
pub use knowledge::KnowledgeConfig;
pub use offline::OfflineConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config directory name.
pub const PROJECT_DIR: &str = ".viva";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VivaConfig {
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub offline: OfflineConfig,
}

impl VivaConfig {
    /// Load configuration from all sources rooted at the current directory.
    ///
    /// Does NOT read `.env`; callers load it into the process environment
    /// first if they want it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse, or
    /// [`ConfigError::InvalidValue`] if generation settings are out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration using `project_root/.viva/config.toml` as the
    /// project-local layer.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_from(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_root).extract()?;
        config.generation.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain rooted at the current directory.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        Self::figment_for(Path::new("."))
    }

    /// Build the figment provider chain for a given project root.
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy un-prefixed provider keys
        figment = figment
            .merge(
                Env::raw()
                    .only(&["GROQ_API_KEY"])
                    .map(|_| "groq.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "gemini.api_key".into()),
            );

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("VIVA_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("viva").join("config.toml"))
    }

    /// Whether any generation provider has a usable key.
    #[must_use]
    pub fn has_any_provider(&self) -> bool {
        self.groq.is_configured() || self.gemini.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = VivaConfig::default();
        assert!(!config.groq.is_configured());
        assert!(!config.gemini.is_configured());
        assert!(!config.has_any_provider());
        assert_eq!(config.generation.max_tokens, 300);
        assert!(config.offline.seed.is_none());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: VivaConfig = VivaConfig::figment().extract()?;
            assert_eq!(config.knowledge.default_topic, "Binary Search");
            assert_eq!(config.generation.provider_order, vec!["groq", "gemini"]);
            Ok(())
        });
    }
}
