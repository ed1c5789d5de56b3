use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("provider returned {status} for url '{url}': {body}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        body: String,
    },

    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode provider response: {reason}")]
    Decode { reason: String },

    #[error("provider response contained no embeddings")]
    EmptyData,

    #[error("embedding task failed: {reason}")]
    TaskFailed { reason: String },

    #[error("invalid provider configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl EmbeddingError {
    /// Upstream HTTP status, if the provider answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            EmbeddingError::HttpStatus { status, .. } => Some(*status),
            EmbeddingError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
