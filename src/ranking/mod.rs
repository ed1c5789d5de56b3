//! Cosine-similarity ranking of documents against a query vector.

use crate::constants::DEFAULT_TOP_K;


/// A document with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDocument {
    /// Position of the document in the request.
    pub index: usize,
    pub score: f32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RankerConfig {
    pub top_k: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimilarityRanker {
    config: RankerConfig,
}

impl SimilarityRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            config: RankerConfig { top_k },
        }
    }

    pub fn with_config(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Scores every document and sorts by descending score.
    ///
    /// The sort is stable: equal scores keep request order.
    pub fn rank<I>(&self, query: &[f32], documents: I) -> Vec<ScoredDocument>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut scored: Vec<ScoredDocument> = documents
            .into_iter()
            .enumerate()
            .map(|(index, (text, embedding))| ScoredDocument {
                index,
                score: cosine_similarity(query, &embedding),
                text,
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        scored
    }

    /// [`rank`](Self::rank) truncated to `top_k`.
    pub fn top_matches<I>(&self, query: &[f32], documents: I) -> Vec<ScoredDocument>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut ranked = self.rank(query, documents);
        ranked.truncate(self.config.top_k);
        ranked
    }
}

/// `dot(a, b) / (|a| * |b|)`.
///
/// Sums run in `f64` so large components cannot overflow the norms. Returns
/// exactly `0.0` when either vector has zero norm, for empty or
/// length-mismatched inputs, and whenever the result is not finite.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&av, &bv)| {
                let (av, bv) = (f64::from(av), f64::from(bv));
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = (dot / (norm_a * norm_b)) as f32;
    if similarity.is_finite() { similarity } else { 0.0 }
}
