use axum::{Json, body::Bytes, extract::State};
use tracing::{debug, error, info, instrument};

use crate::embedding::{EmbeddingProvider, fetch_embeddings};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{SimilarityRequest, SimilarityResponse};
use crate::gateway::state::HandlerState;

/// `POST /similarity`.
///
/// The body is parsed here rather than through `Json`, so syntax errors and a
/// missing `Content-Type` are reported as 422 like any other invalid request.
#[instrument(skip(state, body), fields(docs = tracing::field::Empty))]
pub async fn similarity_handler<E>(
    State(state): State<HandlerState<E>>,
    body: Bytes,
) -> Result<Json<SimilarityResponse>, GatewayError>
where
    E: EmbeddingProvider + 'static,
{
    let request = parse_request(&body)?;
    validate_request(&request)?;
    tracing::Span::current().record("docs", request.docs.len());

    let matches = rank_documents(&state, request).await?;

    Ok(Json(SimilarityResponse { matches }))
}

pub(crate) fn parse_request(body: &[u8]) -> Result<SimilarityRequest, GatewayError> {
    serde_json::from_slice(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request body: {}", e)))
}

pub(crate) fn validate_request(request: &SimilarityRequest) -> Result<(), GatewayError> {
    if request.query.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "`query` must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Embeds docs and query in one fan-out, then returns the best document texts.
pub(crate) async fn rank_documents<E>(
    state: &HandlerState<E>,
    request: SimilarityRequest,
) -> Result<Vec<String>, GatewayError>
where
    E: EmbeddingProvider + 'static,
{
    let SimilarityRequest { docs, query } = request;

    if docs.is_empty() {
        debug!("No documents supplied - skipping provider calls");
        return Ok(Vec::new());
    }

    let doc_count = docs.len();
    let mut texts = docs;
    texts.push(query);

    let mut embedded = fetch_embeddings(&state.provider, texts)
        .await
        .map_err(|e| {
            error!(error = %e, "Embedding fetch failed");
            GatewayError::ProviderError(e)
        })?;

    let (_, query_embedding) = embedded.pop().ok_or_else(|| {
        GatewayError::InternalError("query embedding missing from fan-out result".to_string())
    })?;

    let ranked = state.ranker.top_matches(&query_embedding, embedded);

    info!(
        docs = doc_count,
        matches = ranked.len(),
        top_score = ranked.first().map(|d| d.score),
        "Documents ranked"
    );

    Ok(ranked.into_iter().map(|d| d.text).collect())
}
