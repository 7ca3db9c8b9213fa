//! Retrieval-Augmented Generation pipeline for docrag.
//!
//! Provides local-first RAG over a folder of plain-text documents:
//! - Character-window chunking
//! - Embeddings via Ollama (or a deterministic hash provider for tests)
//! - A SQLite-persisted vector index with exact cosine search
//! - Prompt building and answer generation through the LLM router

pub mod chunker;
pub mod embeddings;
pub mod ingest;
pub mod pipeline;
pub mod prompt;
pub mod retriever;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use ingest::{ingest, IngestReport};
pub use pipeline::{RagAnswer, RagPipeline};
pub use retriever::Retriever;
pub use store::VectorStore;
pub use types::{DocumentChunk, ScoredChunk};
