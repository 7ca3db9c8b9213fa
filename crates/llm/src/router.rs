//! LLM router with a fixed fallback answer.
//!
//! The router wraps a primary client and degrades gracefully: any provider
//! error turns into the literal answer "I don't know." so callers always
//! get a response. Callers that need the raw error use `complete` instead.

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use docrag_core::AppResult;
use std::sync::Arc;

/// The answer substituted when the provider fails.
pub const FALLBACK_ANSWER: &str = "I don't know.";

/// Routes completion requests to a primary LLM client.
pub struct LlmRouter {
    primary: Arc<dyn LlmClient>,
}

impl LlmRouter {
    /// Create a router around a primary client.
    pub fn new(primary: Arc<dyn LlmClient>) -> Self {
        Self { primary }
    }

    /// Name of the primary provider.
    pub fn provider_name(&self) -> &str {
        self.primary.provider_name()
    }

    /// Complete a request, propagating provider errors to the caller.
    pub async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.primary.complete(request).await
    }

    /// Generate an answer, substituting [`FALLBACK_ANSWER`] on any error.
    pub async fn generate(&self, request: &LlmRequest) -> String {
        match self.primary.complete(request).await {
            Ok(response) => response.content,
            Err(e) => {
                tracing::warn!(
                    provider = self.primary.provider_name(),
                    "Generation failed, using fallback answer: {}",
                    e
                );
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}
