//! Provider selection at startup.
//!
//! Walks `generation.provider_order` once, keeping every provider that has
//! usable credentials. The first kept provider is the bound one; the rest are
//! fallbacks. An empty binding is a normal state: every reply then comes from
//! the offline responder.

use std::fmt;
use std::time::Duration;

use viva_config::VivaConfig;

use crate::gemini::GeminiProvider;
use crate::groq::GroqProvider;
use crate::http::build_client;
use crate::provider::GenerationProvider;

/// Ordered generation backends resolved for this process.
#[derive(Default)]
pub struct ProviderBinding {
    providers: Vec<Box<dyn GenerationProvider>>,
}

impl fmt::Debug for ProviderBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ProviderBinding {
    /// Bind an explicit, already-ordered provider list.
    #[must_use]
    pub fn new(providers: Vec<Box<dyn GenerationProvider>>) -> Self {
        Self { providers }
    }

    /// No providers: offline mode.
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// The first provider tried, if any.
    #[must_use]
    pub fn bound(&self) -> Option<&dyn GenerationProvider> {
        self.providers.first().map(AsRef::as_ref)
    }

    /// All providers in attempt order.
    #[must_use]
    pub fn providers(&self) -> &[Box<dyn GenerationProvider>] {
        &self.providers
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Resolve the provider binding from configuration.
///
/// Unknown names are skipped with a warning, unconfigured providers are
/// skipped silently, and repeated names are tried once.
#[must_use]
pub fn select_providers(config: &VivaConfig) -> ProviderBinding {
    let timeout = Duration::from_secs(config.generation.attempt_timeout_secs);
    let http = match build_client(timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "failed to build HTTP client; running in offline mode");
            return ProviderBinding::offline();
        }
    };

    let mut providers: Vec<Box<dyn GenerationProvider>> = Vec::new();
    for name in &config.generation.provider_order {
        let name = name.trim().to_ascii_lowercase();
        if providers.iter().any(|p| p.name() == name) {
            continue;
        }
        let provider: Option<Box<dyn GenerationProvider>> = match name.as_str() {
            "groq" => GroqProvider::from_config(&config.groq, http.clone())
                .map(|p| Box::new(p) as Box<dyn GenerationProvider>),
            "gemini" => GeminiProvider::from_config(&config.gemini, http.clone())
                .map(|p| Box::new(p) as Box<dyn GenerationProvider>),
            other => {
                tracing::warn!(provider = other, "unknown provider in generation.provider_order");
                continue;
            }
        };
        match provider {
            Some(p) => providers.push(p),
            None => tracing::debug!(provider = %name, "provider not configured, skipping"),
        }
    }

    let binding = ProviderBinding::new(providers);
    match binding.bound() {
        Some(bound) => tracing::info!(
            provider = bound.name(),
            fallbacks = binding.providers().len() - 1,
            "bound generation provider"
        ),
        None => tracing::warn!("no generation provider configured; running in offline mode"),
    }
    binding
}
