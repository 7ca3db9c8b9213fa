//! RAG type definitions.

use serde::{Deserialize, Serialize};

/// A chunk of a source document, ready for embedding and storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Path of the source document (relative to the docs folder)
    pub source: String,

    /// Position within the source (0-based chunk index)
    pub position: u32,

    /// Text content
    pub text: String,

    /// Embedding vector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Path of the source document
    pub source: String,

    /// Text content
    pub text: String,

    /// Cosine similarity to the query (higher is more relevant)
    pub score: f32,
}
