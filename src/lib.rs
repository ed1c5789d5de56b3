//! simrank library crate (used by the server binary and integration tests).
//!
//! Ranks candidate documents by cosine similarity to a query, using an external
//! embedding provider.
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - server configuration from `SIMRANK_*` env vars
//! - [`EmbeddingProvider`], [`HttpEmbedder`], [`fetch_embeddings`] - embedding retrieval
//! - [`SimilarityRanker`], [`cosine_similarity`] - scoring and ordering
//! - [`gateway`] - Axum router, handler state and HTTP error mapping
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod ranking;

pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_EMBEDDING_MODEL, DEFAULT_PROVIDER_BASE_URL, DEFAULT_TOP_K};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{EmbeddingError, EmbeddingProvider, HttpEmbedder, fetch_embeddings};
pub use gateway::{
    GatewayError, HandlerState, SimilarityRequest, SimilarityResponse, create_router_with_state,
};
pub use ranking::{RankerConfig, ScoredDocument, SimilarityRanker, cosine_similarity};
