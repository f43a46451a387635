//! # viva-llm
//!
//! Remote text-generation providers for Viva.
//!
//! - [`GroqProvider`]: OpenAI-compatible `chat/completions`, role-tagged messages.
//! - [`GeminiProvider`]: `generateContent` with a single flattened prompt.
//!
//! [`select_providers`] resolves the ordered [`ProviderBinding`] once at
//! startup from [`viva_config::VivaConfig`]. Providers report failures as
//! [`ProviderError`]; deciding what to do about them is the caller's job.

pub mod gemini;
pub mod groq;
pub mod http;
pub mod provider;
pub mod selector;

mod error;

pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use provider::{GenerationProvider, GenerationRequest};
pub use selector::{ProviderBinding, select_providers};
