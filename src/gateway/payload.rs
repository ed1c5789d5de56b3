use serde::{Deserialize, Serialize};

/// Body of `POST /similarity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRequest {
    pub docs: Vec<String>,
    pub query: String,
}

/// Successful reply: best documents first, at most three.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub matches: Vec<String>,
}
