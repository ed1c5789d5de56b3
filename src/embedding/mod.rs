//! Embedding providers.
//!
//! - [`http`] talks to an OpenAI-compatible `/embeddings` endpoint.
//! - [`mock`] is a deterministic stand-in for tests (`mock` feature).
//! - [`fanout`] embeds many texts concurrently behind one await.

mod error;
/// Concurrent multi-text fetch.
pub mod fanout;
/// Real HTTPS provider client.
pub mod http;
#[cfg(any(test, feature = "mock"))]
/// Deterministic fake provider.
pub mod mock;
mod provider;


pub use error::EmbeddingError;
pub use fanout::fetch_embeddings;
pub use http::{HttpEmbedder, parse_embedding_response};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MOCK_SEMANTIC_DIM, MockEmbedder};
pub use provider::EmbeddingProvider;
