//! HTTPS client for an OpenAI-compatible `/embeddings` endpoint.

use std::time::Instant;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::constants::MAX_BODY_SNIPPET_BYTES;
use crate::embedding::error::EmbeddingError;
use crate::embedding::provider::EmbeddingProvider;

/// Request body for `POST {base}/embeddings`.
#[derive(Debug, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
}

/// Response body for `POST {base}/embeddings`.
#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingItem {
    pub embedding: Vec<f32>,
}

/// Real provider client.
///
/// Holds a preconfigured `reqwest::Client` (bearer token, JSON content type and
/// timeout are set once at construction).
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl HttpEmbedder {
    /// Builds the client from a validated [`Config`].
    pub fn new(config: &Config) -> Result<Self, EmbeddingError> {
        let mut auth = header::HeaderValue::from_str(&format!(
            "Bearer {}",
            config.provider_token.trim()
        ))
        .map_err(|e| EmbeddingError::InvalidConfig {
            reason: format!("invalid provider token header: {e}"),
        })?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.provider_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: e.to_string(),
            })?;

        let url = config.embeddings_url();

        info!(
            url = %url,
            model = %config.embedding_model,
            timeout_secs = config.provider_timeout.as_secs(),
            "HttpEmbedder initialized"
        );

        Ok(Self {
            client,
            url,
            model: config.embedding_model.clone(),
        })
    }

    /// Full embeddings endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl EmbeddingProvider for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let started = Instant::now();
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        debug!(model = %self.model, input_len = text.len(), "POST {}", self.url);

        let resp = self.client.post(&self.url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let raw = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&raw);

            error!(
                %status,
                url = %self.url,
                body = %snippet,
                model = %self.model,
                latency_ms = started.elapsed().as_millis() as u64,
                "Provider /embeddings returned non-success status"
            );

            return Err(EmbeddingError::HttpStatus {
                status,
                url: self.url.clone(),
                body: snippet,
            });
        }

        let bytes = resp.bytes().await?;
        let embedding = parse_embedding_response(&bytes)?;

        debug!(
            dim = embedding.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Embedding received"
        );

        Ok(embedding)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Extracts `data[0].embedding` from a provider response body.
pub fn parse_embedding_response(bytes: &[u8]) -> Result<Vec<f32>, EmbeddingError> {
    let parsed: EmbeddingResponse =
        serde_json::from_slice(bytes).map_err(|e| EmbeddingError::Decode {
            reason: format!("{e}; expected `data[0].embedding`"),
        })?;

    parsed
        .data
        .into_iter()
        .next()
        .map(|item| item.embedding)
        .ok_or(EmbeddingError::EmptyData)
}

/// Trims an upstream body to at most [`MAX_BODY_SNIPPET_BYTES`] on a char boundary.
pub(crate) fn make_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= MAX_BODY_SNIPPET_BYTES {
        return trimmed.to_string();
    }

    let mut end = MAX_BODY_SNIPPET_BYTES;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
