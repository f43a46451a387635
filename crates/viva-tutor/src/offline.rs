//! Rule-based replies used when no generation provider answers.
//!
//! The student's message is lower-cased, trimmed and matched against keyword
//! lists in a fixed priority order; the first matching [`OfflineIntent`]
//! selects a reply template filled from the retrieved record. Phrase variety
//! comes from a seedable RNG, so a fixed seed gives reproducible replies.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use viva_config::OfflineConfig;
use viva_core::KnowledgeRecord;

/// Messages shorter than this (in characters) without code are small talk.
const SHORT_MESSAGE_CHARS: usize = 15;

const GREETING_CODE_TOKENS: &[&str] = &["def ", "for ", "while", "if ", "return"];
const CODE_TOKENS: &[&str] = &["def ", "for ", "while", "return"];
const AFFIRMATIVE_TOKENS: &[&str] = &["yes", "correct", "right", "yeah", "i think"];
const UNCERTAIN_TOKENS: &[&str] = &["no", "wrong", "not", "don't", "idk", "i don't"];
const QUESTION_TOKENS: &[&str] = &["why", "how", "explain", "what", "?"];
const VARIABLE_TOKENS: &[&str] = &["mid", "low", "high", "pointer", "index"];

const PREFIXES: &[&str] = &["Good. ", "I see. ", "Okay. ", "Interesting. ", "Let's think about that. "];

const GREETING_COUNT: usize = 3;

/// What the student's message looks like, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfflineIntent {
    /// No knowledge record was found for the topic.
    NoContext,
    /// Short message with no code: greeting or small talk.
    Greeting,
    /// The message contains code.
    Code,
    /// The student agrees or claims understanding.
    Affirmative,
    /// The student disagrees or is unsure.
    Uncertain,
    /// The student asks a question.
    Question,
    /// The student talks about implementation variables.
    Variables,
    /// Anything else.
    Redirect,
}

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| text.contains(t))
}

/// Classify a student message. First match wins.
#[must_use]
pub fn classify(message: &str, has_context: bool) -> OfflineIntent {
    if !has_context {
        return OfflineIntent::NoContext;
    }

    let s = message.trim().to_lowercase();

    if s.chars().count() < SHORT_MESSAGE_CHARS && !contains_any(&s, GREETING_CODE_TOKENS) {
        OfflineIntent::Greeting
    } else if contains_any(&s, CODE_TOKENS) {
        OfflineIntent::Code
    } else if contains_any(&s, AFFIRMATIVE_TOKENS) {
        OfflineIntent::Affirmative
    } else if contains_any(&s, UNCERTAIN_TOKENS) {
        OfflineIntent::Uncertain
    } else if contains_any(&s, QUESTION_TOKENS) {
        OfflineIntent::Question
    } else if contains_any(&s, VARIABLE_TOKENS) {
        OfflineIntent::Variables
    } else {
        OfflineIntent::Redirect
    }
}

/// Deterministic-under-seed fallback responder.
pub struct OfflineResponder {
    rng: Mutex<StdRng>,
}

impl OfflineResponder {
    /// Responder with a fixed seed: identical inputs give identical replies.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Responder seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    #[must_use]
    pub fn from_config(config: &OfflineConfig) -> Self {
        config.seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Produce a reply. Never empty.
    pub fn respond(&self, message: &str, topic: &str, context: Option<&KnowledgeRecord>) -> String {
        let intent = classify(message, context.is_some());
        tracing::debug!(?intent, "offline reply");

        let Some(ctx) = context else {
            return format!(
                "I can see you're working on **{topic}**. Could you share your approach or paste your code so I can guide you?"
            );
        };

        // RNG state stays valid across a poisoning panic.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        if intent == OfflineIntent::Greeting {
            return match rng.random_range(0..GREETING_COUNT) {
                0 => format!(
                    "Hey there! Let's get focused on **{topic}** — go ahead and share your code or explain your approach."
                ),
                1 => format!("Hi! I'm ready to help with **{topic}**. Share your code and let's dig in."),
                _ => format!(
                    "Hello! Let's make the most of our session on **{topic}**. What's your implementation so far?"
                ),
            };
        }

        let p = PREFIXES.choose(&mut *rng).copied().unwrap_or_default();
        match intent {
            OfflineIntent::Code => format!(
                "{p}I can see your code. Let me ask you this: **{}**\n\n*(Think about: {})*",
                ctx.diagnostic_question, ctx.misconception
            ),
            OfflineIntent::Affirmative => format!(
                "{p}Good thinking! Now push further — what happens when the array has **duplicate elements** or is completely **empty**?"
            ),
            OfflineIntent::Uncertain => format!(
                "{p}That's alright — let's trace through it step by step. \
                 Take a small array like `[2, 5, 8]` and target `5`. \
                 Walk me through what your `low`, `mid`, and `high` look like after the **first iteration**."
            ),
            OfflineIntent::Question => format!(
                "{p}Great question. In **{topic}**, {} is a frequent pitfall because:\n{}\n\nDoes that connect to what you were thinking?",
                ctx.misconception, ctx.explanation
            ),
            OfflineIntent::Variables => format!(
                "{p}You're thinking about the right variables! Now: **{}**",
                ctx.diagnostic_question
            ),
            OfflineIntent::Redirect | OfflineIntent::NoContext | OfflineIntent::Greeting => format!(
                "{p}That's interesting, but let's stay focused on **{topic}**. \
                 How does what you said relate to **{}**? \
                 If you're unsure, try sharing your code and we'll trace through it together.",
                ctx.concept
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use viva_core::RecordKind;

    use super::*;

    fn record() -> KnowledgeRecord {
        KnowledgeRecord {
            id: "Binary_Search_0".into(),
            topic: "Binary Search".into(),
            concept: "Loop termination".into(),
            misconception: "setting low = mid".into(),
            diagnostic_question: "What happens when low equals high?".into(),
            explanation: "The range must shrink every iteration.".into(),
            kind: RecordKind::Misconception,
        }
    }

    #[rstest]
    #[case::greeting("hiii", OfflineIntent::Greeting)]
    #[case::empty("", OfflineIntent::Greeting)]
    #[case::short_code("if x: y", OfflineIntent::Redirect)]
    #[case::code_beats_question("why does my for loop fail?", OfflineIntent::Code)]
    #[case::code_def("def binary_search(arr, t): ...", OfflineIntent::Code)]
    #[case::affirmative("Yes, I think mid is correct here", OfflineIntent::Affirmative)]
    #[case::uncertain("idk, this is confusing me a lot", OfflineIntent::Uncertain)]
    #[case::question("can you explain the stopping rule", OfflineIntent::Question)]
    #[case::variables("the mid value keeps repeating itself", OfflineIntent::Variables)]
    #[case::redirect("let's talk about football matches", OfflineIntent::Redirect)]
    fn classification(#[case] message: &str, #[case] expected: OfflineIntent) {
        assert_eq!(classify(message, true), expected);
    }

    #[test]
    fn missing_context_wins_over_everything() {
        assert_eq!(classify("def f(): return 1", false), OfflineIntent::NoContext);
        let reply = OfflineResponder::seeded(1).respond("hiii", "Graphs", None);
        assert!(reply.contains("**Graphs**"));
        assert!(reply.contains("share your approach"));
    }

    #[test]
    fn greeting_mentions_topic() {
        let responder = OfflineResponder::seeded(7);
        for _ in 0..10 {
            let reply = responder.respond("hiii", "Binary Search", Some(&record()));
            assert!(reply.contains("**Binary Search**"), "{reply}");
        }
    }

    #[test]
    fn code_reply_carries_diagnostic_question() {
        let reply = OfflineResponder::seeded(3).respond(
            "def binary_search(arr, t): ...",
            "Binary Search",
            Some(&record()),
        );
        assert!(reply.contains("What happens when low equals high?"));
        assert!(reply.contains("*(Think about: setting low = mid)*"));
        assert!(PREFIXES.iter().any(|p| reply.starts_with(p)));
    }

    #[test]
    fn same_seed_same_replies() {
        let messages = ["hiii", "why?", "no idea at all really", "while True: pass", "sure thing friend"];
        let a = OfflineResponder::seeded(42);
        let b = OfflineResponder::seeded(42);
        for message in messages {
            assert_eq!(
                a.respond(message, "Binary Search", Some(&record())),
                b.respond(message, "Binary Search", Some(&record()))
            );
        }
    }

    #[rstest]
    #[case::affirmative("Yes, I think mid is correct here", &["duplicate elements", "empty"])]
    #[case::uncertain("idk, this is confusing me a lot", &["`[2, 5, 8]`", "target `5`", "**first iteration**"])]
    #[case::question(
        "can you explain the stopping rule",
        &["**Binary Search**", "setting low = mid", "The range must shrink every iteration."]
    )]
    #[case::variables("the mid value keeps repeating itself", &["right variables", "What happens when low equals high?"])]
    #[case::redirect("let's talk about football matches", &["**Binary Search**", "**Loop termination**"])]
    fn intent_replies_carry_their_content(#[case] message: &str, #[case] fragments: &[&str]) {
        let reply = OfflineResponder::seeded(5).respond(message, "Binary Search", Some(&record()));
        assert!(PREFIXES.iter().any(|p| reply.starts_with(p)), "{reply}");
        for fragment in fragments {
            assert!(reply.contains(fragment), "missing {fragment:?} in {reply}");
        }
    }

    #[test]
    fn every_intent_yields_text() {
        let responder = OfflineResponder::seeded(0);
        for message in [
            "",
            "hello",
            "for i in range(n): pass",
            "yes that's correct I believe",
            "that's wrong, I'm lost",
            "what is the invariant here",
            "the pointer moves to index two",
            "completely unrelated sentence here",
        ] {
            assert!(!responder.respond(message, "Binary Search", Some(&record())).is_empty());
        }
    }
}
