//! Embedding provider trait and factory.

use docrag_core::{AppConfig, AppError, AppResult};
use std::sync::Arc;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "ollama", "hash")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Embedding("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
pub fn create_provider(config: &AppConfig) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match config.embedding_provider.as_str() {
        "ollama" => {
            let provider = super::providers::ollama::OllamaEmbedder::new(
                &config.endpoint,
                &config.embedding_model,
                config.embedding_dim,
            );
            Ok(Arc::new(provider))
        }

        "hash" => {
            let provider = super::providers::hash::HashEmbedder::new(config.embedding_dim);
            Ok(Arc::new(provider))
        }

        other => Err(AppError::Embedding(format!(
            "Unknown embedding provider: '{}'. Supported providers: ollama, hash",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hash_provider() {
        let mut config = AppConfig::default();
        config.embedding_provider = "hash".to_string();
        config.embedding_dim = 384;

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "hash");
        assert_eq!(provider.dimensions(), 384);
    }

    #[test]
    fn test_create_ollama_provider() {
        let config = AppConfig::default();
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "nomic-embed-text");
    }

    #[test]
    fn test_create_unknown_provider() {
        let mut config = AppConfig::default();
        config.embedding_provider = "faiss".to_string();

        let result = create_provider(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unknown embedding provider"));
    }

    #[tokio::test]
    async fn test_provider_embed_single() {
        let mut config = AppConfig::default();
        config.embedding_provider = "hash".to_string();
        config.embedding_dim = 384;

        let provider = create_provider(&config).unwrap();
        let embedding = provider.embed("test text").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }
}
