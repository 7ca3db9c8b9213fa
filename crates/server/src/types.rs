//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's question
    pub question: String,
}

/// Response body for `POST /query`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The generated answer
    pub answer: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable error description
    pub detail: String,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the server is up
    pub status: String,

    /// Crate version
    pub version: String,

    /// Completion model in use
    pub model: String,

    /// Whether a vector index is loaded
    pub index_ready: bool,
}
