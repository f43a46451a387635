//! Cross-cutting error types for Viva.
//!
//! Domain-specific errors (e.g., `KnowledgeError`, `ProviderError`) are defined
//! in their respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Viva crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A string did not name a known enum variant.
    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    /// Data failed validation (missing fields, empty values).
    #[error("Validation error: {0}")]
    Validation(String),
}
