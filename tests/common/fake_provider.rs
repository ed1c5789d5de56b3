//! Local stand-in for an OpenAI-compatible `/v1/embeddings` endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use simrank::MockEmbedder;
use simrank::embedding::EmbeddingProvider;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::harness::{ServerStartupError, TestServer, serve_router};

pub const FAKE_TOKEN: &str = "test-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeMode {
    /// Answer with vectors from `MockEmbedder::semantic()`.
    Ok,
    /// Reject every call with 401.
    Unauthorized,
    /// 200 with a body that is not the embeddings schema.
    Malformed,
    /// 200 with an empty `data` array.
    EmptyData,
    /// Sleep longer than any sane client timeout.
    Hang,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub authorization: Option<String>,
    pub model: String,
    pub input: String,
}

#[derive(Clone)]
struct FakeState {
    mode: FakeMode,
    embedder: Arc<MockEmbedder>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

pub struct FakeProvider {
    pub server: TestServer,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeProvider {
    /// Base URL to hand to `Config::provider_base_url`.
    pub fn base_url(&self) -> String {
        format!("{}/v1", self.server.url())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub async fn spawn_fake_provider(mode: FakeMode) -> Result<FakeProvider, ServerStartupError> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        mode,
        embedder: Arc::new(MockEmbedder::semantic()),
        calls: Arc::clone(&calls),
    };

    let router = Router::new()
        .route("/v1/embeddings", post(embeddings_handler))
        .with_state(state);

    let server = serve_router(router).await?;
    Ok(FakeProvider { server, calls })
}

async fn embeddings_handler(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let model = body["model"].as_str().unwrap_or_default().to_string();
    let input = body["input"].as_str().unwrap_or_default().to_string();

    state.calls.lock().unwrap().push(RecordedCall {
        authorization: authorization.clone(),
        model: model.clone(),
        input: input.clone(),
    });

    let expected_auth = format!("Bearer {}", FAKE_TOKEN);
    if state.mode == FakeMode::Unauthorized || authorization.as_deref() != Some(&expected_auth) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": {"message": "Invalid token", "type": "invalid_request_error"}
            })),
        )
            .into_response();
    }

    match state.mode {
        FakeMode::Malformed => {
            (StatusCode::OK, Json(serde_json::json!({"result": "nope"}))).into_response()
        }
        FakeMode::EmptyData => {
            (StatusCode::OK, Json(serde_json::json!({"data": []}))).into_response()
        }
        FakeMode::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
        FakeMode::Ok | FakeMode::Unauthorized => {
            let embedding = match state.embedder.embed(&input).await {
                Ok(v) => v,
                Err(e) => {
                    return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
                }
            };
            Json(serde_json::json!({
                "object": "list",
                "data": [{"object": "embedding", "index": 0, "embedding": embedding}],
                "model": model,
                "usage": {"prompt_tokens": 1, "total_tokens": 1}
            }))
            .into_response()
        }
    }
}
