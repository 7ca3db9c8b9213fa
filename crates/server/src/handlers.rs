//! HTTP request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use docrag_rag::RagPipeline;
use std::sync::Arc;
use tracing::{error, info};

use crate::types::{ErrorDetail, HealthResponse, QueryRequest, QueryResponse};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The RAG pipeline shared across requests
    pub pipeline: Arc<RagPipeline>,
}

/// `POST /query` — answer a question through the pipeline.
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorDetail>)> {
    info!("POST /query: {}", request.question);

    if request.question.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorDetail {
                detail: "question must not be blank".to_string(),
            }),
        ));
    }

    match state.pipeline.answer(&request.question).await {
        Ok(result) => Ok(Json(QueryResponse {
            answer: result.answer,
        })),
        Err(e) => {
            error!("Error answering query: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            ))
        }
    }
}

/// `GET /health` — health check for monitoring.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.pipeline.model().to_string(),
        index_ready: state.pipeline.index_ready(),
    })
}

/// `GET /` — the embedded web UI.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}
