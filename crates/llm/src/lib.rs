//! LLM integration crate for docrag.
//!
//! This crate provides a provider-agnostic abstraction for interacting with
//! Large Language Models through a unified trait-based interface, plus a
//! router that degrades to a fixed fallback answer when the provider fails.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//!
//! # Example
//! ```no_run
//! use docrag_llm::{LlmClient, LlmRequest, OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hello, world!", "phi3");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;
pub mod router;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use providers::OllamaClient;
pub use router::LlmRouter;
