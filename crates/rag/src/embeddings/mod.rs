//! Embedding providers for docrag.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
pub use providers::{HashEmbedder, OllamaEmbedder};
