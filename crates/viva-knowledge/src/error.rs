//! Knowledge store error types.

use std::path::PathBuf;

/// Errors that can occur in the knowledge store or while loading datasets.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// Embedding the query or a record failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] viva_embeddings::EmbeddingError),

    /// I/O error (dataset files, store directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset file is not a JSON array of known entries.
    #[error("invalid dataset {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A dataset entry failed validation.
    #[error("invalid record in {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        #[source]
        source: viva_core::CoreError,
    },

    /// The embedder returned vectors of the wrong size.
    #[error("embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A stored row could not be mapped back into a record.
    #[error("corrupt record {id}: {reason}")]
    CorruptRecord { id: String, reason: String },

    /// A previous panic poisoned the store lock.
    #[error("knowledge store lock poisoned")]
    Poisoned,
}
