//! The provider seam shared by every generation backend.

use async_trait::async_trait;
use viva_core::ConversationTurn;

use crate::ProviderError;

/// One generation call: system instruction, prior turns, new student message.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub system_prompt: &'a str,
    pub history: &'a [ConversationTurn],
    pub user_message: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A remote text-generation backend.
///
/// Implementations are immutable after construction so one instance can be
/// shared across concurrent requests.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short stable name used in logs and provider order (`groq`, `gemini`).
    fn name(&self) -> &str;

    /// Produce the tutor's reply text.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport, status, or parse failure, or
    /// when the provider returns no text.
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError>;
}
