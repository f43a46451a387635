//! The tutoring entry point.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use viva_config::VivaConfig;
use viva_core::{KnowledgeRecord, VivaRequest};
use viva_llm::{GenerationRequest, ProviderBinding};

use crate::dispatcher::{DispatchOutcome, Dispatcher, ReplySource, panic_message};
use crate::lookup::KnowledgeLookup;
use crate::offline::OfflineResponder;
use crate::prompt::{build_system_prompt, expert_context};

/// Retrieval, prompt assembly, provider dispatch and offline fallback for
/// one viva turn.
///
/// Built once per process and shared behind `Arc`; every field is either
/// immutable or internally synchronized.
pub struct TutorEngine {
    lookup: Box<dyn KnowledgeLookup>,
    dispatcher: Dispatcher,
    offline: OfflineResponder,
    max_tokens: u32,
    temperature: f32,
    default_topic: String,
}

impl TutorEngine {
    /// Assemble an engine from already-resolved parts and config constants.
    #[must_use]
    pub fn new(
        lookup: Box<dyn KnowledgeLookup>,
        binding: ProviderBinding,
        offline: OfflineResponder,
        config: &VivaConfig,
    ) -> Self {
        Self {
            lookup,
            dispatcher: Dispatcher::new(
                binding,
                Duration::from_secs(config.generation.attempt_timeout_secs),
            ),
            offline,
            max_tokens: config.generation.max_tokens,
            temperature: config.generation.temperature,
            default_topic: config.knowledge.default_topic.clone(),
        }
    }

    /// Override the per-provider attempt deadline.
    #[must_use]
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.with_attempt_timeout(timeout);
        self
    }

    #[must_use]
    pub const fn binding(&self) -> &ProviderBinding {
        self.dispatcher.binding()
    }

    /// Tutor reply for a flat `Tutor:`/`Student:` transcript. Never empty.
    pub async fn generate_tutor_reply(&self, student_message: &str, topic: &str, history_text: &str) -> String {
        let request = VivaRequest::from_transcript(student_message, topic, history_text);
        self.reply(&request).await.reply
    }

    /// Tutor reply and the path that produced it. Never fails.
    ///
    /// A panic anywhere in the turn (lookup, offline responder) is caught
    /// and answered with a generic safe reply.
    pub async fn reply(&self, request: &VivaRequest) -> DispatchOutcome {
        let topic = if request.topic.trim().is_empty() {
            self.default_topic.as_str()
        } else {
            request.topic.trim()
        };

        let outcome = match AssertUnwindSafe(self.compose(request, topic))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(payload) => {
                tracing::error!(topic, panic = %panic_message(payload.as_ref()), "tutor turn panicked");
                return safe_outcome(topic);
            }
        };

        if outcome.reply.trim().is_empty() {
            tracing::warn!(source = %outcome.source, "empty reply, substituting safe prompt");
            return safe_outcome(topic);
        }
        outcome
    }

    async fn compose(&self, request: &VivaRequest, topic: &str) -> DispatchOutcome {
        tracing::debug!(
            topic,
            input_len = request.student_message.len(),
            turns = request.history.len(),
            "viva request"
        );

        let record = self.retrieve(topic).await;
        let context = expert_context(topic, record.as_ref());
        let system_prompt = build_system_prompt(topic, &context);

        let generation = GenerationRequest {
            system_prompt: &system_prompt,
            history: &request.history,
            user_message: &request.student_message,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        self.dispatcher
            .dispatch(&generation, || {
                self.offline
                    .respond(&request.student_message, topic, record.as_ref())
            })
            .await
    }

    async fn retrieve(&self, topic: &str) -> Option<KnowledgeRecord> {
        match self.lookup.lookup(topic).await {
            Ok(record) => {
                tracing::debug!(topic, found = record.is_some(), "knowledge lookup");
                record
            }
            Err(e) => {
                tracing::warn!(topic, error = %e, "knowledge lookup failed, continuing without context");
                None
            }
        }
    }
}

fn safe_outcome(topic: &str) -> DispatchOutcome {
    DispatchOutcome {
        reply: format!("Let's keep working on **{topic}**. Can you walk me through your current approach?"),
        source: ReplySource::Offline,
    }
}
