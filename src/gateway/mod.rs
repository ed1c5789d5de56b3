//! HTTP gateway (Axum) for document similarity ranking.
//!
//! This module is primarily used by the `simrank` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::Method,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::similarity_handler;
pub use payload::{SimilarityRequest, SimilarityResponse};
pub use state::HandlerState;

use crate::embedding::EmbeddingProvider;

pub fn create_router_with_state<E>(state: HandlerState<E>) -> Router
where
    E: EmbeddingProvider + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/similarity", post(similarity_handler::<E>))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin and header; only `OPTIONS` and `POST`.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::OPTIONS, Method::POST])
        .allow_headers(Any)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
