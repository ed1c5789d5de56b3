use std::future::Future;

use crate::embedding::error::EmbeddingError;

/// Source of text embeddings.
///
/// Implementations must be cheap to share behind an `Arc`: the gateway calls
/// [`embed`](EmbeddingProvider::embed) from many tasks at once.
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the embedding vector for `text`.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Model identifier reported in logs.
    fn model_name(&self) -> &str;
}
