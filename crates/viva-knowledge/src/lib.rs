//! # viva-knowledge
//!
//! `DuckDB` storage for tutoring knowledge records.
//!
//! Each record is embedded once at ingestion from its document text
//! (`Topic: … Concept: … Misconception: …`) and ranked at query time with
//! `array_cosine_similarity()` over a brute-force scan. The store is small
//! (tens to low thousands of rows), so no vector index is built.
//!
//! The `DuckDB` connection and the embedder both need exclusive access, so
//! they live together behind one `Mutex`. From async code, call the store
//! inside `tokio::task::spawn_blocking`.

pub mod dataset;
pub mod error;
pub mod schema;
mod store;

pub use dataset::{load_dataset, parse_dataset};
pub use error::KnowledgeError;
pub use store::ScoredRecord;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use duckdb::Connection;
use viva_embeddings::{EmbeddingEngine, TextEmbedder};

struct Inner<E> {
    conn: Connection,
    embedder: E,
}

/// Knowledge store backed by a single `DuckDB` file (or memory).
pub struct KnowledgeStore<E: TextEmbedder = EmbeddingEngine> {
    inner: Mutex<Inner<E>>,
    min_score: f64,
}

impl KnowledgeStore<EmbeddingEngine> {
    /// Open or create a store file using the fastembed model.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Embedding`] if the model cannot be loaded,
    /// or any error from [`KnowledgeStore::open_local_with`].
    pub fn open_default(path: &Path) -> Result<Self, KnowledgeError> {
        Self::open_local_with(path, EmbeddingEngine::new()?)
    }
}

impl<E: TextEmbedder> KnowledgeStore<E> {
    /// Open or create a store file, creating its parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::Io`] if the directory cannot be created, or
    /// [`KnowledgeError::DuckDb`] if the file cannot be opened or the schema
    /// cannot be created.
    pub fn open_local_with(path: &Path, embedder: E) -> Result<Self, KnowledgeError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!(path = %path.display(), "opening knowledge store");
        Self::with_connection(Connection::open(path)?, embedder)
    }

    /// Open an in-memory store (for tests and one-off sessions).
    ///
    /// # Errors
    ///
    /// Returns [`KnowledgeError::DuckDb`] if schema creation fails.
    pub fn open_in_memory(embedder: E) -> Result<Self, KnowledgeError> {
        Self::with_connection(Connection::open_in_memory()?, embedder)
    }

    fn with_connection(conn: Connection, embedder: E) -> Result<Self, KnowledgeError> {
        conn.execute_batch(schema::CREATE_KNOWLEDGE_RECORDS)?;
        Ok(Self {
            inner: Mutex::new(Inner { conn, embedder }),
            min_score: 0.0,
        })
    }

    /// Set the relevance floor below which matches are discarded.
    #[must_use]
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<E>>, KnowledgeError> {
        self.inner.lock().map_err(|_| KnowledgeError::Poisoned)
    }
}
