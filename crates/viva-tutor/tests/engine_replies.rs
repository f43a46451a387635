//! End-to-end engine behavior with scripted providers and in-memory knowledge.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use viva_config::VivaConfig;
use viva_core::{ConversationTurn, KnowledgeRecord, RecordKind, VivaRequest};
use viva_llm::{GenerationProvider, GenerationRequest, ProviderBinding, ProviderError};
use viva_tutor::{KnowledgeLookup, OfflineResponder, ReplySource, StaticLookup, TutorEngine, TutorError};

fn binary_search() -> KnowledgeRecord {
    KnowledgeRecord {
        id: "Binary_Search_0".into(),
        topic: "Binary Search".into(),
        concept: "Loop termination".into(),
        misconception: "Updating low = mid instead of low = mid + 1".into(),
        diagnostic_question: "What happens when low equals high?".into(),
        explanation: "If the range never shrinks the loop never ends.".into(),
        kind: RecordKind::Misconception,
    }
}

/// Records what it was asked and replies with a fixed text.
struct Recording {
    reply: &'static str,
    seen: Arc<Mutex<Vec<(String, usize, String)>>>,
}

#[async_trait]
impl GenerationProvider for Recording {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        self.seen.lock().unwrap().push((
            request.system_prompt.to_string(),
            request.history.len(),
            request.user_message.to_string(),
        ));
        Ok(self.reply.to_string())
    }
}

struct Failing;

#[async_trait]
impl GenerationProvider for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        Err(ProviderError::RateLimited { retry_after_secs: 60 })
    }
}

struct Hanging;

#[async_trait]
impl GenerationProvider for Hanging {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".into())
    }
}

struct Panicking;

#[async_trait]
impl GenerationProvider for Panicking {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn generate(&self, _request: &GenerationRequest<'_>) -> Result<String, ProviderError> {
        panic!("provider sdk bug");
    }
}

struct PanickingLookup;

#[async_trait]
impl KnowledgeLookup for PanickingLookup {
    async fn lookup(&self, _query: &str) -> Result<Option<KnowledgeRecord>, TutorError> {
        panic!("index corrupted");
    }
}

struct BrokenLookup;

#[async_trait]
impl KnowledgeLookup for BrokenLookup {
    async fn lookup(&self, _query: &str) -> Result<Option<KnowledgeRecord>, TutorError> {
        Err(TutorError::Knowledge(viva_knowledge::KnowledgeError::Poisoned))
    }
}

fn engine(lookup: Box<dyn KnowledgeLookup>, providers: Vec<Box<dyn GenerationProvider>>) -> TutorEngine {
    TutorEngine::new(
        lookup,
        ProviderBinding::new(providers),
        OfflineResponder::seeded(11),
        &VivaConfig::default(),
    )
}

fn with_record() -> Box<dyn KnowledgeLookup> {
    Box::new(StaticLookup::new(vec![binary_search()]))
}

#[tokio::test]
async fn empty_store_and_no_providers_still_replies() {
    let engine = engine(Box::new(StaticLookup::empty()), Vec::new());
    let reply = engine.generate_tutor_reply("", "Binary Search", "").await;
    assert!(!reply.trim().is_empty());
    assert!(reply.contains("Binary Search"));
}

#[tokio::test]
async fn second_provider_answers_when_first_fails() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let engine = engine(
        with_record(),
        vec![
            Box::new(Failing),
            Box::new(Recording {
                reply: "Why does the loop stop?",
                seen: Arc::clone(&seen),
            }),
        ],
    );

    let outcome = engine
        .reply(&VivaRequest::new("my code loops forever", "Binary Search", Vec::new()))
        .await;
    assert_eq!(outcome.reply, "Why does the loop stop?");
    assert_eq!(outcome.source, ReplySource::Provider("recording".into()));
}

#[tokio::test]
async fn hung_provider_is_abandoned_after_timeout() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let engine = engine(
        with_record(),
        vec![
            Box::new(Hanging),
            Box::new(Recording {
                reply: "next question",
                seen,
            }),
        ],
    )
    .with_attempt_timeout(Duration::from_millis(50));

    let started = std::time::Instant::now();
    let reply = engine.generate_tutor_reply("hello there", "Binary Search", "").await;
    assert_eq!(reply, "next question");
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[tokio::test]
async fn all_providers_failing_falls_back_offline() {
    let engine = engine(with_record(), vec![Box::new(Failing), Box::new(Failing)]);
    let outcome = engine
        .reply(&VivaRequest::new(
            "def binary_search(arr, t): ...",
            "Binary Search",
            Vec::new(),
        ))
        .await;
    assert_eq!(outcome.source, ReplySource::Offline);
    assert!(outcome.reply.contains("What happens when low equals high?"));
}

#[tokio::test]
async fn greeting_offline_mentions_topic() {
    let engine = engine(with_record(), Vec::new());
    let reply = engine.generate_tutor_reply("hiii", "Binary Search", "").await;
    assert!(reply.contains("Binary Search"), "{reply}");
}

#[tokio::test]
async fn provider_sees_prompt_history_and_message() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let engine = engine(
        with_record(),
        vec![Box::new(Recording {
            reply: "ok?",
            seen: Arc::clone(&seen),
        })],
    );

    engine
        .generate_tutor_reply(
            "I think mid is correct",
            "Binary Search",
            "Tutor: Share your code.\nrandom noise\nStudent: hiii\n",
        )
        .await;

    let calls = seen.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (system_prompt, turns, message) = &calls[0];
    assert!(system_prompt.contains("Key Diagnostic Question: What happens when low equals high?"));
    assert_eq!(*turns, 2);
    assert_eq!(message, "I think mid is correct");
}

#[tokio::test]
async fn lookup_failure_uses_placeholder_context() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let engine = engine(
        Box::new(BrokenLookup),
        vec![Box::new(Recording {
            reply: "ok?",
            seen: Arc::clone(&seen),
        })],
    );
    engine.generate_tutor_reply("hello", "Heaps", "").await;
    let calls = seen.lock().unwrap();
    assert!(calls[0].0.contains("No specific misconception data found for Heaps."));
}

#[tokio::test]
async fn blank_topic_uses_configured_default() {
    let engine = engine(with_record(), Vec::new());
    let reply = engine
        .reply(&VivaRequest::new(
            "while low < high: pass",
            "  ",
            vec![ConversationTurn::tutor("Share your code.")],
        ))
        .await;
    assert!(reply.reply.contains("What happens when low equals high?"));
}

#[tokio::test]
async fn same_seed_same_offline_conversation() {
    let a = engine(with_record(), Vec::new());
    let b = engine(with_record(), Vec::new());
    for message in ["hiii", "no idea honestly, sorry", "why would it stop?", "football is fun to watch"] {
        assert_eq!(
            a.generate_tutor_reply(message, "Binary Search", "").await,
            b.generate_tutor_reply(message, "Binary Search", "").await
        );
    }
}

#[tokio::test]
async fn panicking_provider_falls_back_offline() {
    let engine = engine(with_record(), vec![Box::new(Panicking)]);
    let outcome = engine
        .reply(&VivaRequest::new(
            "def binary_search(arr, t): ...",
            "Binary Search",
            Vec::new(),
        ))
        .await;
    assert_eq!(outcome.source, ReplySource::Offline);
    assert!(!outcome.reply.trim().is_empty());
    assert!(outcome.reply.contains("What happens when low equals high?"));
}

#[tokio::test]
async fn panicking_lookup_yields_safe_reply() {
    let engine = engine(Box::new(PanickingLookup), Vec::new());
    let outcome = engine
        .reply(&VivaRequest::new("hello", "Graphs", Vec::new()))
        .await;
    assert_eq!(outcome.source, ReplySource::Offline);
    assert!(outcome.reply.contains("**Graphs**"), "{}", outcome.reply);
}
