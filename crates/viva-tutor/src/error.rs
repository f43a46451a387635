//! Tutor engine error types.
//!
//! None of these reach the caller of [`crate::TutorEngine::reply`]; they are
//! logged and replaced by a fallback at the engine boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("knowledge lookup failed: {0}")]
    Knowledge(#[from] viva_knowledge::KnowledgeError),

    #[error("knowledge lookup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
