//! Command handlers for the docrag CLI.

pub mod ask;
pub mod chat;
pub mod ingest;
pub mod serve;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use ingest::IngestCommand;
pub use serve::ServeCommand;

use docrag_core::{AppConfig, AppResult};
use docrag_llm::{LlmRouter, OllamaClient};
use docrag_rag::embeddings::create_provider;
use docrag_rag::{RagPipeline, Retriever};
use std::sync::Arc;

/// Assemble the RAG pipeline from the configuration.
pub(crate) fn build_pipeline(config: &AppConfig) -> AppResult<RagPipeline> {
    let embedder = create_provider(config)?;
    let retriever = Retriever::open(config, embedder);
    let router = LlmRouter::new(Arc::new(OllamaClient::with_base_url(&config.endpoint)));
    Ok(RagPipeline::new(config, retriever, router))
}
