//! HTTP gateway (Axum) for relevance analysis.
//!
//! This module is primarily used by the `relevon` server binary.

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::relevance_handler;
pub use state::HandlerState;

/// Max accepted request body (uploaded documents are plain text).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(health_handler))
        .route("/model/bi-encoder/", post(relevance_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct CapabilityResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
    pub embedder_mode: &'static str,
    pub sensitivity_enabled: bool,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[tracing::instrument(skip(state))]
pub async fn root_handler(State(state): State<HandlerState>) -> Json<CapabilityResponse> {
    let embedder_mode = if state.scorer.is_embedder_stub() {
        "stub"
    } else {
        "real"
    };

    Json(CapabilityResponse {
        service: "relevon",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: &["GET /", "GET /healthz", "POST /model/bi-encoder/"],
        embedder_mode,
        sensitivity_enabled: state.scorer.has_classifier(),
    })
}
