//! JSON dataset loading.
//!
//! Two shapes are accepted, and may be mixed within one file:
//!
//! - misconception entries: `{topic, concept, misconception, diagnostic_question, explanation}`,
//!   identified as `<Topic_Underscored>_<index>`;
//! - problem-sheet entries: `{id, title, topic, ...}` with the pedagogical
//!   fields optional, identified by their own `id`.

use std::path::Path;

use serde::Deserialize;
use viva_core::{KnowledgeRecord, RecordKind};

use crate::KnowledgeError;

#[derive(Debug, Deserialize)]
struct MisconceptionEntry {
    topic: String,
    concept: String,
    misconception: String,
    diagnostic_question: String,
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct ProblemEntry {
    id: String,
    title: String,
    topic: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    concept: Option<String>,
    #[serde(default)]
    misconception: Option<String>,
    #[serde(default)]
    diagnostic_question: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetEntry {
    Problem(ProblemEntry),
    Misconception(MisconceptionEntry),
}

/// Derive the storage id for the `index`-th misconception entry of a file.
#[must_use]
pub fn misconception_id(topic: &str, index: usize) -> String {
    format!("{}_{index}", topic.replace(' ', "_"))
}

impl MisconceptionEntry {
    fn into_record(self, index: usize) -> KnowledgeRecord {
        KnowledgeRecord {
            id: misconception_id(&self.topic, index),
            topic: self.topic,
            concept: self.concept,
            misconception: self.misconception,
            diagnostic_question: self.diagnostic_question,
            explanation: self.explanation,
            kind: RecordKind::Misconception,
        }
    }
}

impl ProblemEntry {
    fn into_record(self) -> KnowledgeRecord {
        let misconception = self.misconception.unwrap_or_else(|| {
            format!(
                "Jumping into \"{}\" without recognising it as a {} problem",
                self.title, self.topic
            )
        });
        let diagnostic_question = self.diagnostic_question.unwrap_or_else(|| {
            format!(
                "Before writing code for \"{}\", which {} idea does it rely on, and why?",
                self.title, self.topic
            )
        });
        let explanation = self.explanation.unwrap_or_else(|| match &self.difficulty {
            Some(difficulty) => format!(
                "\"{}\" is a {difficulty} {} problem; naming the pattern first keeps the solution focused.",
                self.title, self.topic
            ),
            None => format!(
                "\"{}\" is a {} problem; naming the pattern first keeps the solution focused.",
                self.title, self.topic
            ),
        });

        KnowledgeRecord {
            id: self.id,
            concept: self.concept.unwrap_or(self.title),
            topic: self.topic,
            misconception,
            diagnostic_question,
            explanation,
            kind: RecordKind::Problem,
        }
    }
}

/// Parse dataset JSON text into records.
///
/// # Errors
///
/// Returns the `serde_json` error if the text is not an array of known entries.
pub fn parse_dataset(json: &str) -> Result<Vec<KnowledgeRecord>, serde_json::Error> {
    let entries: Vec<DatasetEntry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            DatasetEntry::Problem(problem) => problem.into_record(),
            DatasetEntry::Misconception(item) => item.into_record(index),
        })
        .collect())
}

/// Load a dataset file.
///
/// # Errors
///
/// Returns [`KnowledgeError::Io`] if the file cannot be read,
/// [`KnowledgeError::Dataset`] if its contents do not parse, or
/// [`KnowledgeError::InvalidRecord`] if an entry has blank required fields.
pub fn load_dataset(path: &Path) -> Result<Vec<KnowledgeRecord>, KnowledgeError> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_dataset(&text).map_err(|source| KnowledgeError::Dataset {
        path: path.to_path_buf(),
        source,
    })?;
    for record in &records {
        record.validate().map_err(|source| KnowledgeError::InvalidRecord {
            path: path.to_path_buf(),
            source,
        })?;
    }
    tracing::debug!(path = %path.display(), count = records.len(), "loaded dataset");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn misconception_entries_get_index_ids() {
        let json = r#"[
            {"topic": "Binary Search", "concept": "c0", "misconception": "m0",
             "diagnostic_question": "q0", "explanation": "e0"},
            {"topic": "Two Pointers", "concept": "c1", "misconception": "m1",
             "diagnostic_question": "q1", "explanation": "e1"}
        ]"#;
        let records = parse_dataset(json).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Binary_Search_0", "Two_Pointers_1"]);
        assert!(records.iter().all(|r| r.kind == RecordKind::Misconception));
    }

    #[test]
    fn problem_entries_fill_missing_fields() {
        let json = r#"[{"id": "arr-007", "title": "Search Insert Position",
                        "topic": "Binary Search", "difficulty": "easy"}]"#;
        let records = parse_dataset(json).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "arr-007");
        assert_eq!(record.kind, RecordKind::Problem);
        assert_eq!(record.concept, "Search Insert Position");
        assert!(record.diagnostic_question.contains("Binary Search"));
        assert!(record.explanation.contains("easy"));
    }

    #[test]
    fn problem_entries_keep_given_fields() {
        let json = r#"[{"id": "p1", "title": "T", "topic": "Heaps",
                        "diagnostic_question": "Why a min-heap?"}]"#;
        let records = parse_dataset(json).unwrap();
        assert_eq!(records[0].diagnostic_question, "Why a min-heap?");
    }

    #[test]
    fn unknown_shape_is_rejected() {
        assert!(parse_dataset(r#"[{"name": "nope"}]"#).is_err());
        assert!(parse_dataset(r#"{"topic": "not an array"}"#).is_err());
    }

    #[test]
    fn empty_array_is_empty_dataset() {
        assert!(parse_dataset("[]").unwrap().is_empty());
    }
}
