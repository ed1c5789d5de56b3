//! HTTP client helpers for tests.

use serde::Deserialize;
use simrank::gateway::{SimilarityRequest, SimilarityResponse};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Ok(resp.json().await?)
    }

    /// Sends a request and returns the raw response.
    pub async fn post_similarity_raw(
        &self,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, TestClientError> {
        Ok(self
            .client
            .post(self.url("/similarity"))
            .json(body)
            .send()
            .await?)
    }

    /// Sends a request and expects `200`.
    pub async fn similarity(
        &self,
        docs: &[&str],
        query: &str,
    ) -> Result<SimilarityResponse, TestClientError> {
        let request = SimilarityRequest {
            docs: docs.iter().map(|d| d.to_string()).collect(),
            query: query.to_string(),
        };

        let resp = self
            .client
            .post(self.url("/similarity"))
            .json(&request)
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus { status, body })
            }
        }
    }
}
