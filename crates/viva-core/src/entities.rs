//! Entity structs for the tutoring loop.

use serde::{Deserialize, Serialize};

use crate::enums::{RecordKind, Speaker};
use crate::errors::CoreError;
use crate::transcript;

/// One pedagogical entry in the knowledge store.
///
/// Records are written by ingestion and are read-only afterwards. The `id` is
/// derived at ingestion time (`<Topic_Underscored>_<index>` for misconception
/// datasets, the problem id for problem sheets).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeRecord {
    pub id: String,
    pub topic: String,
    pub concept: String,
    pub misconception: String,
    pub diagnostic_question: String,
    pub explanation: String,
    #[serde(default)]
    pub kind: RecordKind,
}

impl KnowledgeRecord {
    /// Text that gets embedded for similarity search.
    #[must_use]
    pub fn document_text(&self) -> String {
        format!(
            "Topic: {}. Concept: {}. Misconception: {}.",
            self.topic, self.concept, self.misconception
        )
    }

    /// Reject records whose id, topic, or diagnostic question is blank.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("id", &self.id),
            ("topic", &self.topic),
            ("diagnostic_question", &self.diagnostic_question),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "record '{}' has an empty {field}",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// A single utterance in a viva conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ConversationTurn {
    #[must_use]
    pub fn tutor(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Tutor,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn student(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Student,
            text: text.into(),
        }
    }
}

/// Input for one tutoring turn. Transient; never persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VivaRequest {
    pub student_message: String,
    pub topic: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

impl VivaRequest {
    #[must_use]
    pub fn new(
        student_message: impl Into<String>,
        topic: impl Into<String>,
        history: Vec<ConversationTurn>,
    ) -> Self {
        Self {
            student_message: student_message.into(),
            topic: topic.into(),
            history,
        }
    }

    /// Build a request from a flat `Tutor:` / `Student:` transcript.
    ///
    /// Legacy decoding path; callers that already hold structured turns
    /// should use [`VivaRequest::new`].
    #[must_use]
    pub fn from_transcript(
        student_message: impl Into<String>,
        topic: impl Into<String>,
        history_text: &str,
    ) -> Self {
        Self::new(
            student_message,
            topic,
            transcript::parse_transcript(history_text),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_record() -> KnowledgeRecord {
        KnowledgeRecord {
            id: "Binary_Search_0".into(),
            topic: "Binary Search".into(),
            concept: "Loop invariant".into(),
            misconception: "Updating low = mid causes an infinite loop".into(),
            diagnostic_question: "What happens when low equals high?".into(),
            explanation: "mid never advances past low.".into(),
            kind: RecordKind::Misconception,
        }
    }

    #[test]
    fn document_text_combines_topic_concept_misconception() {
        assert_eq!(
            sample_record().document_text(),
            "Topic: Binary Search. Concept: Loop invariant. Misconception: Updating low = mid causes an infinite loop."
        );
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        assert!(sample_record().validate().is_ok());
        let blank_question = KnowledgeRecord {
            diagnostic_question: "  ".into(),
            ..sample_record()
        };
        assert!(matches!(
            blank_question.validate(),
            Err(CoreError::Validation(msg)) if msg.contains("diagnostic_question")
        ));
    }

    #[test]
    fn record_kind_defaults_when_missing() {
        let json = r#"{
            "id": "x", "topic": "t", "concept": "c", "misconception": "m",
            "diagnostic_question": "q", "explanation": "e"
        }"#;
        let record: KnowledgeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, RecordKind::Misconception);
    }

    #[test]
    fn request_from_transcript_parses_history() {
        let req = VivaRequest::from_transcript(
            "I think mid is correct",
            "Binary Search",
            "Tutor: Share your code.\nStudent: hiii",
        );
        assert_eq!(
            req.history,
            vec![
                ConversationTurn::tutor("Share your code."),
                ConversationTurn::student("hiii"),
            ]
        );
    }
}
