//! # viva-core
//!
//! Core types, transcript parsing, and error types for Viva.
//!
//! This crate provides the foundational types shared across all Viva crates:
//! - Knowledge records retrieved to ground a tutoring turn
//! - Speaker / record-kind enums
//! - Conversation turns and the per-invocation viva request
//! - The flat-transcript decoder (`Tutor:` / `Student:` lines)
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod transcript;

pub use entities::{ConversationTurn, KnowledgeRecord, VivaRequest};
pub use enums::{RecordKind, Speaker};
pub use errors::CoreError;
