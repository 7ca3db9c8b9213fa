//! RAG pipeline orchestration: retrieve, then generate.

use crate::prompt::build_prompt;
use crate::retriever::Retriever;
use docrag_core::{AppConfig, AppResult};
use docrag_llm::{LlmRequest, LlmRouter};
use serde::{Deserialize, Serialize};

/// Generation temperature: low, for grounded answers.
const TEMPERATURE: f32 = 0.2;

/// Maximum tokens in a generated answer.
const MAX_NEW_TOKENS: u32 = 200;

/// An answer produced by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    /// The generated answer text
    pub answer: String,

    /// Number of retrieved chunks supplied as context
    pub chunks_used: usize,
}

/// The full two-step pipeline: similarity retrieval plus LLM generation.
pub struct RagPipeline {
    retriever: Retriever,
    router: LlmRouter,
    model: String,
    top_k: usize,
}

impl RagPipeline {
    /// Assemble the pipeline from its parts.
    pub fn new(config: &AppConfig, retriever: Retriever, router: LlmRouter) -> Self {
        Self {
            retriever,
            router,
            model: config.model.clone(),
            top_k: config.top_k,
        }
    }

    /// Completion model used for generation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether the underlying retriever has a loaded index.
    pub fn index_ready(&self) -> bool {
        self.retriever.is_ready()
    }

    /// Answer a question: retrieve top-k chunks, build the prompt, and
    /// generate through the router.
    ///
    /// Retrieval and embedding errors propagate; generation errors are
    /// absorbed by the router's fallback answer.
    pub async fn answer(&self, question: &str) -> AppResult<RagAnswer> {
        tracing::info!("Answering question: {}", question);

        let chunks = self.retriever.retrieve(question, self.top_k).await?;
        tracing::debug!("Retrieved {} context chunks", chunks.len());

        let prompt = build_prompt(question, &chunks)?;

        let request = LlmRequest::new(prompt, &self.model)
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_NEW_TOKENS);

        let raw = self.router.generate(&request).await;
        let answer = extract_answer(&raw);

        Ok(RagAnswer {
            answer,
            chunks_used: chunks.len(),
        })
    }
}

/// Extract the answer from the model's raw output.
///
/// Models prompted with a trailing `Answer:` cue sometimes echo the prompt;
/// keep only the text after the last marker.
fn extract_answer(raw: &str) -> String {
    match raw.rfind("Answer:") {
        Some(idx) => raw[idx + "Answer:".len()..].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{EmbeddingProvider, HashEmbedder};
    use crate::ingest::ingest;
    use docrag_core::AppError;
    use docrag_llm::{LlmClient, LlmResponse, LlmUsage};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct EchoClient;

    #[async_trait::async_trait]
    impl LlmClient for EchoClient {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            // Echo the prompt back, the way a base model might
            Ok(LlmResponse {
                content: format!("{}\nThe answer from context.", request.prompt),
                model: request.model.clone(),
                usage: LlmUsage::default(),
                done: true,
            })
        }
    }

    struct FailingClient;

    #[async_trait::async_trait]
    impl LlmClient for FailingClient {
        fn provider_name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
            Err(AppError::Llm("model unavailable".to_string()))
        }
    }

    fn test_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.docs_dir = dir.path().join("docs");
        config.index_path = dir.path().join("index.db");
        config.chunk_size = 120;
        config.chunk_overlap = 20;
        config.embedding_dim = 128;
        config.top_k = 3;
        config
    }

    async fn indexed_retriever(config: &AppConfig) -> Retriever {
        std::fs::create_dir_all(&config.docs_dir).unwrap();
        std::fs::write(
            config.docs_dir.join("faq.txt"),
            "We provide digital marketing services including social media campaigns.",
        )
        .unwrap();

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HashEmbedder::new(128));
        ingest(config, embedder.clone()).await.unwrap();
        Retriever::open(config, embedder)
    }

    #[test]
    fn test_extract_answer_after_marker() {
        let raw = "Question: x\nAnswer: It depends.\n";
        assert_eq!(extract_answer(raw), "It depends.");
    }

    #[test]
    fn test_extract_answer_last_marker_wins() {
        let raw = "Answer: echoed prompt\nsome text\nAnswer:\n  The real one.  ";
        assert_eq!(extract_answer(raw), "The real one.");
    }

    #[test]
    fn test_extract_answer_without_marker() {
        assert_eq!(extract_answer("  plain text  "), "plain text");
    }

    #[tokio::test]
    async fn test_answer_happy_path() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let retriever = indexed_retriever(&config).await;

        let pipeline = RagPipeline::new(&config, retriever, LlmRouter::new(Arc::new(EchoClient)));

        let result = pipeline
            .answer("What marketing services do you provide?")
            .await
            .unwrap();

        assert_eq!(result.answer, "The answer from context.");
        assert!(result.chunks_used > 0);
    }

    #[tokio::test]
    async fn test_answer_falls_back_on_llm_failure() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let retriever = indexed_retriever(&config).await;

        let pipeline =
            RagPipeline::new(&config, retriever, LlmRouter::new(Arc::new(FailingClient)));

        let result = pipeline.answer("anything").await.unwrap();
        assert_eq!(result.answer, docrag_llm::router::FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_answer_with_missing_index() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let retriever = Retriever::open(&config, Arc::new(HashEmbedder::new(128)));

        let pipeline = RagPipeline::new(&config, retriever, LlmRouter::new(Arc::new(EchoClient)));

        // No context, but the pipeline still answers
        let result = pipeline.answer("anything").await.unwrap();
        assert_eq!(result.chunks_used, 0);
        assert!(!result.answer.is_empty());
    }
}
