//! # viva-embeddings
//!
//! Local embedding generation for Viva using fastembed (ONNX runtime).
//!
//! Knowledge records and lookup queries are embedded into 384-dimensional
//! vectors without any external API key, so retrieval keeps working when no
//! generation provider is reachable.
//!
//! ## Model
//!
//! Uses [`AllMiniLML6V2`](fastembed::EmbeddingModel::AllMiniLML6V2) (sentence-transformers/all-MiniLM-L6-v2):
//! - 384-dimensional output vectors
//! - Mean pooling (no query/passage prefix needed)
//! - ~80MB model size, cached at `~/.viva/cache/fastembed/`
//!
//! ## Async usage
//!
//! The fastembed ONNX runtime is synchronous. When calling from async code,
//! wrap calls in `tokio::task::spawn_blocking`.

pub mod error;

pub use error::EmbeddingError;
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};

/// Output dimensionality shared by every embedder the knowledge store accepts.
pub const EMBEDDING_DIM: usize = 384;

/// Anything that can turn text into fixed-size vectors.
///
/// The knowledge store is generic over this so tests can swap in a
/// deterministic embedder instead of downloading the ONNX model.
pub trait TextEmbedder: Send {
    /// Embed a batch of texts, one vector per input, in order.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError`] if inference fails.
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::EmptyResult`] if the batch call returns nothing.
    fn embed_single(&mut self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut results = self.embed_batch(vec![text.to_string()])?;
        results.pop().ok_or(EmbeddingError::EmptyResult)
    }
}

/// Local embedding engine backed by fastembed (ONNX runtime).
///
/// # Thread safety
///
/// [`TextEmbedding::embed`] requires `&mut self`. The knowledge store keeps
/// the engine behind a `Mutex` alongside its database connection.
pub struct EmbeddingEngine {
    model: TextEmbedding,
}

impl EmbeddingEngine {
    /// Create a new embedding engine with the `AllMiniLML6V2` model.
    ///
    /// Downloads the model on first run (~80MB) to `~/.viva/cache/fastembed/`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::InitFailed`] if model download or ONNX initialization fails.
    pub fn new() -> Result<Self, EmbeddingError> {
        let cache_dir = dirs::home_dir().map_or_else(
            || std::path::PathBuf::from(".fastembed_cache"),
            |h| h.join(".viva").join("cache").join("fastembed"),
        );
        tracing::debug!(cache_dir = %cache_dir.display(), "initializing embedding model");

        let model = TextEmbedding::try_new(
            TextInitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(true),
        )
        .map_err(|e| EmbeddingError::InitFailed(e.to_string()))?;

        Ok(Self { model })
    }

    /// Embedding vector dimensionality (always 384 for `AllMiniLML6V2`).
    #[must_use]
    pub const fn dimension() -> usize {
        EMBEDDING_DIM
    }
}

impl TextEmbedder for EmbeddingEngine {
    fn embed_batch(&mut self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::EmbedFailed(e.to_string()))
    }
}
