use std::sync::Arc;

use crate::embedding::EmbeddingProvider;
use crate::ranking::SimilarityRanker;

pub struct HandlerState<E: EmbeddingProvider + 'static> {
    pub provider: Arc<E>,

    pub ranker: Arc<SimilarityRanker>,
}

impl<E: EmbeddingProvider + 'static> Clone for HandlerState<E> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            ranker: Arc::clone(&self.ranker),
        }
    }
}

impl<E: EmbeddingProvider + 'static> std::fmt::Debug for HandlerState<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerState")
            .field("model", &self.provider.model_name())
            .field("ranker", &self.ranker)
            .finish()
    }
}

impl<E: EmbeddingProvider + 'static> HandlerState<E> {
    pub fn new(provider: Arc<E>) -> Self {
        Self::with_ranker(provider, SimilarityRanker::new())
    }

    pub fn with_ranker(provider: Arc<E>, ranker: SimilarityRanker) -> Self {
        Self {
            provider,
            ranker: Arc::new(ranker),
        }
    }
}
