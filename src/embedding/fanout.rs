//! Concurrent fetch of many embeddings.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use crate::embedding::error::EmbeddingError;
use crate::embedding::provider::EmbeddingProvider;

/// Embeds every text concurrently, one task per text.
///
/// Each text comes back paired with its embedding, in input order. The first
/// failure is returned and the remaining tasks are aborted when the `JoinSet`
/// drops.
pub async fn fetch_embeddings<E>(
    provider: &Arc<E>,
    texts: Vec<String>,
) -> Result<Vec<(String, Vec<f32>)>, EmbeddingError>
where
    E: EmbeddingProvider + 'static,
{
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let total = texts.len();
    let mut tasks = JoinSet::new();
    for (index, text) in texts.into_iter().enumerate() {
        let provider = Arc::clone(provider);
        tasks.spawn(async move {
            let result = provider.embed(&text).await;
            (index, text, result)
        });
    }

    debug!(
        tasks = total,
        model = provider.model_name(),
        "Spawned embedding fetches"
    );

    let mut slots: Vec<Option<(String, Vec<f32>)>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (index, text, result) = joined.map_err(|e| EmbeddingError::TaskFailed {
            reason: e.to_string(),
        })?;
        slots[index] = Some((text, result?));
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| EmbeddingError::TaskFailed {
                reason: format!("no embedding produced for input {index}"),
            })
        })
        .collect()
}
