//! Ordered provider attempts with offline fallback.
//!
//! ```text
//! NotAttempted ──► Trying(0) ──ok──► Succeeded
//!                     │ err/timeout/empty
//!                     ▼
//!                  Trying(1) ──ok──► Succeeded
//!                     │ …
//!                     ▼
//!                  Exhausted ──► offline fallback
//! ```
//!
//! Provider failures, panics included, are logged and never surfaced to the
//! caller.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use viva_llm::{GenerationProvider, GenerationRequest, ProviderBinding, ProviderError};

/// Which path produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// A generation provider, by name.
    Provider(String),
    /// The rule-based offline responder.
    Offline,
}

impl std::fmt::Display for ReplySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl ReplySource {
    /// Provider name, or `offline`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Provider(name) => name,
            Self::Offline => "offline",
        }
    }
}

/// A reply and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub reply: String,
    pub source: ReplySource,
}

enum DispatchState {
    NotAttempted,
    Trying(usize),
    Succeeded { index: usize, text: String },
    Exhausted,
}

/// Tries each bound provider in order, each under its own deadline.
pub struct Dispatcher {
    binding: ProviderBinding,
    attempt_timeout: Duration,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(binding: ProviderBinding, attempt_timeout: Duration) -> Self {
        Self {
            binding,
            attempt_timeout,
        }
    }

    #[must_use]
    pub const fn binding(&self) -> &ProviderBinding {
        &self.binding
    }

    /// Replace the per-attempt deadline.
    #[must_use]
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Run the attempt sequence; `fallback` produces the reply if every
    /// provider fails.
    pub async fn dispatch<F>(&self, request: &GenerationRequest<'_>, fallback: F) -> DispatchOutcome
    where
        F: FnOnce() -> String + Send,
    {
        let providers = self.binding.providers();
        let mut state = DispatchState::NotAttempted;

        loop {
            state = match state {
                DispatchState::NotAttempted if providers.is_empty() => DispatchState::Exhausted,
                DispatchState::NotAttempted => DispatchState::Trying(0),
                DispatchState::Trying(index) => {
                    let provider = providers[index].as_ref();
                    match self.attempt(provider, request).await {
                        Ok(text) => DispatchState::Succeeded { index, text },
                        Err(e) => {
                            tracing::warn!(provider = provider.name(), error = %e, "generation attempt failed");
                            if index + 1 < providers.len() {
                                DispatchState::Trying(index + 1)
                            } else {
                                DispatchState::Exhausted
                            }
                        }
                    }
                }
                DispatchState::Succeeded { index, text } => {
                    let name = providers[index].name().to_string();
                    tracing::debug!(provider = %name, "generation succeeded");
                    return DispatchOutcome {
                        reply: text,
                        source: ReplySource::Provider(name),
                    };
                }
                DispatchState::Exhausted => {
                    tracing::warn!("no provider produced a reply; using offline responder");
                    return DispatchOutcome {
                        reply: fallback(),
                        source: ReplySource::Offline,
                    };
                }
            };
        }
    }

    async fn attempt(
        &self,
        provider: &dyn GenerationProvider,
        request: &GenerationRequest<'_>,
    ) -> Result<String, ProviderError> {
        tracing::debug!(provider = provider.name(), "generation attempt");
        let generation = AssertUnwindSafe(provider.generate(request)).catch_unwind();
        let text = match tokio::time::timeout(self.attempt_timeout, generation).await {
            Err(_) => return Err(ProviderError::Timeout(self.attempt_timeout)),
            Ok(Err(payload)) => {
                return Err(ProviderError::Panicked {
                    provider: provider.name().to_string(),
                    message: panic_message(payload.as_ref()),
                });
            }
            Ok(Ok(result)) => result?,
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse(provider.name().to_string()));
        }
        Ok(text.to_string())
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
