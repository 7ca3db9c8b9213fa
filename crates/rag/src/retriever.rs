//! Similarity retrieval over the persisted vector store.

use crate::embeddings::EmbeddingProvider;
use crate::store::VectorStore;
use crate::types::ScoredChunk;
use docrag_core::{AppConfig, AppResult};
use std::sync::Arc;

/// Retrieves the most similar chunks for a question.
///
/// A missing or unreadable index is not fatal: the retriever starts in an
/// empty state and returns no results until the index is (re)built.
pub struct Retriever {
    store: Option<VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    /// Open the retriever over the configured index.
    pub fn open(config: &AppConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        let store = if config.index_path.exists() {
            match VectorStore::open(&config.index_path) {
                Ok(store) => {
                    tracing::info!("Loaded vector index from {:?}", config.index_path);
                    Some(store)
                }
                Err(e) => {
                    tracing::warn!("Failed to load vector index: {}", e);
                    None
                }
            }
        } else {
            tracing::warn!(
                "Vector index not found at {:?}, run ingestion first",
                config.index_path
            );
            None
        };

        Self { store, embedder }
    }

    /// Whether an index is loaded.
    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    /// Retrieve the top-k chunks most similar to the question.
    ///
    /// Returns an empty list when no index is loaded.
    pub async fn retrieve(&self, question: &str, top_k: usize) -> AppResult<Vec<ScoredChunk>> {
        let Some(store) = &self.store else {
            tracing::debug!("Retrieval skipped: no index loaded");
            return Ok(vec![]);
        };

        let query_embedding = self.embedder.embed(question).await?;
        store.search(&query_embedding, top_k)
    }
}
