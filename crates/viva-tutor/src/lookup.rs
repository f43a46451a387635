//! Knowledge retrieval seam for the engine.

use std::sync::Arc;

use async_trait::async_trait;
use viva_core::KnowledgeRecord;
use viva_embeddings::TextEmbedder;
use viva_knowledge::KnowledgeStore;

use crate::TutorError;

/// Source of the single best knowledge record for a query.
#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    /// Best match for `query`, or `None` if nothing is relevant.
    ///
    /// # Errors
    ///
    /// Returns [`TutorError`] if the backing store fails.
    async fn lookup(&self, query: &str) -> Result<Option<KnowledgeRecord>, TutorError>;
}

#[async_trait]
impl<E> KnowledgeLookup for Arc<KnowledgeStore<E>>
where
    E: TextEmbedder + 'static,
{
    async fn lookup(&self, query: &str) -> Result<Option<KnowledgeRecord>, TutorError> {
        let store = Arc::clone(self);
        let query = query.to_string();
        let record = tokio::task::spawn_blocking(move || store.query(&query)).await??;
        Ok(record)
    }
}

/// Fixed in-memory records matched by topic name (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    records: Vec<KnowledgeRecord>,
}

impl StaticLookup {
    #[must_use]
    pub const fn new(records: Vec<KnowledgeRecord>) -> Self {
        Self { records }
    }

    /// A lookup that never finds anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KnowledgeLookup for StaticLookup {
    async fn lookup(&self, query: &str) -> Result<Option<KnowledgeRecord>, TutorError> {
        let query = query.trim();
        Ok(self
            .records
            .iter()
            .find(|r| r.topic.eq_ignore_ascii_case(query))
            .cloned())
    }
}
