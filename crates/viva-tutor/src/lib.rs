//! # viva-tutor
//!
//! Socratic tutoring engine for Viva.
//!
//! One turn of a viva runs as:
//!
//! 1. look up the best knowledge record for the topic ([`KnowledgeLookup`]);
//! 2. build the examiner system prompt around it ([`prompt`]);
//! 3. try each bound generation provider in order ([`Dispatcher`]);
//! 4. fall back to the rule-based [`OfflineResponder`] if none answers.
//!
//! [`TutorEngine::reply`] never fails and never returns an empty reply.

pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod offline;
pub mod prompt;

pub use dispatcher::{DispatchOutcome, Dispatcher, ReplySource};
pub use engine::TutorEngine;
pub use error::TutorError;
pub use lookup::{KnowledgeLookup, StaticLookup};
pub use offline::{OfflineIntent, OfflineResponder, classify};
