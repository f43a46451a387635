//! `DuckDB` table DDL for the knowledge store.

/// Knowledge records with their document embedding.
///
/// Embeddings are stored as `FLOAT[]` and cast to `FLOAT[384]` at query time
/// for `array_cosine_similarity()`.
pub const CREATE_KNOWLEDGE_RECORDS: &str = "
CREATE TABLE IF NOT EXISTS knowledge_records (
    id TEXT NOT NULL,
    topic TEXT NOT NULL,
    concept TEXT NOT NULL,
    misconception TEXT NOT NULL,
    diagnostic_question TEXT NOT NULL,
    explanation TEXT NOT NULL,
    kind TEXT NOT NULL,
    document TEXT NOT NULL,
    embedding FLOAT[] NOT NULL,
    ingested_at TIMESTAMP DEFAULT current_timestamp,
    PRIMARY KEY (id)
);
";
