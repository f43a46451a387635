//! Write and query operations on [`KnowledgeStore`].

use duckdb::params;
use serde::Serialize;
use viva_core::{KnowledgeRecord, RecordKind};
use viva_embeddings::{EMBEDDING_DIM, TextEmbedder};

use crate::{KnowledgeError, KnowledgeStore};

/// A record with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub record: KnowledgeRecord,
    pub score: f64,
}

/// Format a float slice as a `DuckDB` array literal: `[0.1, 0.2, ...]`.
fn vec_to_sql(v: &[f32]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(v.len() * 10 + 2);
    s.push('[');
    for (i, x) in v.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        let _ = write!(s, "{x}");
    }
    s.push(']');
    s
}

fn check_dim(v: &[f32]) -> Result<(), KnowledgeError> {
    if v.len() == EMBEDDING_DIM {
        Ok(())
    } else {
        Err(KnowledgeError::DimensionMismatch {
            expected: EMBEDDING_DIM,
            actual: v.len(),
        })
    }
}

impl<E: TextEmbedder> KnowledgeStore<E> {
    /// Embed and store records, replacing any existing row with the same id.
    ///
    /// All rows are written in one transaction; on error nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Embedding`] or [`KnowledgeError::DimensionMismatch`]
    /// if embedding fails, or [`KnowledgeError::DuckDb`] on write failure.
    pub fn upsert(&self, records: &[KnowledgeRecord]) -> Result<usize, KnowledgeError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut guard = self.lock()?;
        let inner = &mut *guard;

        let documents: Vec<String> = records.iter().map(KnowledgeRecord::document_text).collect();
        let embeddings = inner.embedder.embed_batch(documents.clone())?;
        if embeddings.len() != records.len() {
            return Err(KnowledgeError::Embedding(
                viva_embeddings::EmbeddingError::EmbedFailed(format!(
                    "expected {} vectors, got {}",
                    records.len(),
                    embeddings.len()
                )),
            ));
        }

        let tx = inner.conn.transaction()?;
        {
            let mut delete = tx.prepare("DELETE FROM knowledge_records WHERE id = ?")?;
            let mut insert = tx.prepare(
                "INSERT INTO knowledge_records (
                    id, topic, concept, misconception, diagnostic_question,
                    explanation, kind, document, embedding
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?::FLOAT[])",
            )?;

            for ((record, document), embedding) in records.iter().zip(&documents).zip(&embeddings) {
                check_dim(embedding)?;
                delete.execute(params![record.id])?;
                insert.execute(params![
                    record.id,
                    record.topic,
                    record.concept,
                    record.misconception,
                    record.diagnostic_question,
                    record.explanation,
                    record.kind.as_str(),
                    document,
                    vec_to_sql(embedding),
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!(count = records.len(), "upserted knowledge records");
        Ok(records.len())
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::DuckDb`] if the query fails.
    pub fn count(&self) -> Result<usize, KnowledgeError> {
        let guard = self.lock()?;
        let n: i64 = guard
            .conn
            .query_row("SELECT count(*) FROM knowledge_records", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// Delete every record.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::DuckDb`] if the delete fails.
    pub fn clear(&self) -> Result<(), KnowledgeError> {
        let guard = self.lock()?;
        guard.conn.execute("DELETE FROM knowledge_records", [])?;
        Ok(())
    }

    /// Rank records by cosine similarity to `text`, best first.
    ///
    /// At most `limit` records are returned, and only those scoring at or
    /// above the store's relevance floor.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Embedding`] if the query cannot be embedded,
    /// [`KnowledgeError::DuckDb`] if the query fails, or
    /// [`KnowledgeError::CorruptRecord`] if a stored `kind` is unknown.
    pub fn search(&self, text: &str, limit: usize) -> Result<Vec<ScoredRecord>, KnowledgeError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut guard = self.lock()?;
        let inner = &mut *guard;

        let query_embedding = inner.embedder.embed_single(text)?;
        check_dim(&query_embedding)?;
        let embedding_sql = vec_to_sql(&query_embedding);

        let sql = format!(
            "SELECT id, topic, concept, misconception, diagnostic_question, explanation, kind,
                    array_cosine_similarity(embedding::FLOAT[{EMBEDDING_DIM}], '{embedding_sql}'::FLOAT[{EMBEDDING_DIM}]) AS score
             FROM knowledge_records
             ORDER BY score DESC, id
             LIMIT {limit}"
        );

        let mut stmt = inner.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, Option<f64>>(7)?,
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (id, topic, concept, misconception, diagnostic_question, explanation, kind, score) =
                row?;
            // A zero vector on either side yields NULL similarity.
            let Some(score) = score else { continue };
            if score < self.min_score {
                continue;
            }
            let kind = kind.parse::<RecordKind>().map_err(|e| KnowledgeError::CorruptRecord {
                id: id.clone(),
                reason: e.to_string(),
            })?;
            results.push(ScoredRecord {
                record: KnowledgeRecord {
                    id,
                    topic,
                    concept,
                    misconception,
                    diagnostic_question,
                    explanation,
                    kind,
                },
                score,
            });
        }

        tracing::debug!(query = text, hits = results.len(), "knowledge search");
        Ok(results)
    }

    /// The single best match for `text`, if any clears the relevance floor.
    ///
    /// # Errors
    ///
    /// Same as [`KnowledgeStore::search`].
    pub fn query(&self, text: &str) -> Result<Option<KnowledgeRecord>, KnowledgeError> {
        Ok(self.search(text, 1)?.into_iter().next().map(|hit| hit.record))
    }
}
