//! HTTP API and embedded web UI for docrag.
//!
//! Exposes the RAG pipeline over a small REST surface:
//! - `POST /query` — answer a question
//! - `GET /health` — health check
//! - `GET /` — single-page web UI

pub mod handlers;
pub mod routes;
pub mod types;

use docrag_core::{AppConfig, AppError, AppResult};
use docrag_llm::{LlmRouter, OllamaClient};
use docrag_rag::embeddings::create_provider;
use docrag_rag::{RagPipeline, Retriever};
use std::sync::Arc;
use tracing::info;

pub use handlers::AppState;

/// Build the pipeline and serve the HTTP API until shutdown.
pub async fn serve(config: &AppConfig) -> AppResult<()> {
    info!("Starting docrag API server");

    let embedder = create_provider(config)?;
    let retriever = Retriever::open(config, embedder);
    let router = LlmRouter::new(Arc::new(OllamaClient::with_base_url(&config.endpoint)));
    let pipeline = Arc::new(RagPipeline::new(config, retriever, router));

    let state = AppState { pipeline };
    let app = routes::app_routes(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
