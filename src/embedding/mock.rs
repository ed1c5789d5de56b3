//! Deterministic in-process provider for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::embedding::error::EmbeddingError;
use crate::embedding::provider::EmbeddingProvider;

/// Dimension of [`MockEmbedder::semantic`] vectors.
pub const MOCK_SEMANTIC_DIM: usize = 4;

#[derive(Debug, Clone)]
struct MockFailure {
    status: StatusCode,
    body: String,
    only_for: Option<String>,
}

/// Fake [`EmbeddingProvider`].
///
/// Registered texts return their fixed vector; anything else gets a unit vector
/// seeded from the blake3 hash of the text, so results are stable across runs.
#[derive(Debug)]
pub struct MockEmbedder {
    dim: usize,
    fixed: HashMap<String, Vec<f32>>,
    failure: Option<MockFailure>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Decrements the in-flight counter even when the call is dropped mid-delay.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockEmbedder {
    pub const MODEL_NAME: &'static str = "mock-embedding";
    pub const MOCK_URL: &'static str = "mock://embeddings";

    /// Creates an empty mock producing `dim`-sized hashed vectors.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            fixed: HashMap::new(),
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Small hand-built space with an "animal" axis and a "vehicle" axis.
    pub fn semantic() -> Self {
        Self::new(MOCK_SEMANTIC_DIM)
            .with_vector("cat", vec![0.92, 0.08, 0.20, 0.05])
            .with_vector("dog", vec![0.88, 0.12, 0.05, 0.22])
            .with_vector("animal", vec![1.00, 0.02, 0.05, 0.05])
            .with_vector("car", vec![0.10, 0.95, 0.15, 0.02])
            .with_vector("bicycle", vec![0.18, 0.82, 0.02, 0.30])
            .with_vector("vehicle", vec![0.05, 1.00, 0.05, 0.05])
    }

    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.fixed.insert(text.into(), vector);
        self
    }

    /// Every call fails with `status` and `body`.
    pub fn failing_with(mut self, status: u16, body: impl Into<String>) -> Self {
        self.failure = Some(MockFailure {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.into(),
            only_for: None,
        });
        self
    }

    /// Only calls for `text` fail.
    pub fn failing_for(
        mut self,
        text: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.failure = Some(MockFailure {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.into(),
            only_for: Some(text.into()),
        });
        self
    }

    /// Sleeps before answering each successful call. Injected failures answer at once.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls that ran to the end with an embedding.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Currently running calls.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn hashed_vector(&self, text: &str) -> Vec<f32> {
        let digest = blake3::hash(text.as_bytes());
        let mut seed_bytes = [0u8; 8];
        seed_bytes.copy_from_slice(&digest.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed_bytes);

        let mut vector = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            vector.push(value);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }
        vector
    }

    fn injected_failure(&self, text: &str) -> Option<EmbeddingError> {
        let failure = self.failure.as_ref()?;
        if !failure.only_for.as_deref().is_none_or(|t| t == text) {
            return None;
        }

        Some(EmbeddingError::HttpStatus {
            status: failure.status,
            url: Self::MOCK_URL.to_string(),
            body: failure.body.clone(),
        })
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        self.fixed
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.hashed_vector(text))
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::semantic()
    }
}

impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlightGuard(&self.in_flight);
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        debug!(text_len = text.len(), "Generating mock embedding");

        if let Some(err) = self.injected_failure(text) {
            return Err(err);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let vector = self.vector_for(text);
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        Self::MODEL_NAME
    }
}
