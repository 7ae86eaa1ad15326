use axum::{Json, extract::Multipart, extract::State};
use tracing::{debug, instrument};

use relevon::scoring::RelevanceReport;

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;

/// `POST /model/bi-encoder/` — scores an uploaded document against a topic.
///
/// Expects a multipart form with a `topic` text field and a `file` field
/// holding a UTF-8 text document. Scoring runs on the blocking pool since a
/// candle forward pass can take hundreds of milliseconds.
#[instrument(skip(state, multipart))]
pub async fn relevance_handler(
    State(state): State<HandlerState>,
    mut multipart: Multipart,
) -> Result<Json<RelevanceReport>, GatewayError> {
    let mut topic: Option<String> = None;
    let mut file: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::validation(format!("malformed multipart body: {e}"), ""))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("topic") => {
                let value = field.text().await.map_err(|e| {
                    GatewayError::validation(format!("topic field unreadable: {e}"), "topic")
                })?;
                topic = Some(value);
            }
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    GatewayError::validation(format!("file field unreadable: {e}"), "file")
                })?;
                file = Some(bytes.to_vec());
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let topic = topic
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| GatewayError::validation("missing required field: topic", "topic"))?;
    let bytes =
        file.ok_or_else(|| GatewayError::validation("missing required field: file", "file"))?;

    let text = String::from_utf8(bytes)
        .map_err(|_| GatewayError::validation("file must be valid UTF-8 text", "file"))?;

    debug!(
        topic = %topic,
        file = file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = text.len(),
        "scoring uploaded document"
    );

    let scorer = state.scorer.clone();
    let report = tokio::task::spawn_blocking(move || scorer.score_relevance(&text, &topic))
        .await
        .map_err(|e| anyhow::anyhow!("scoring task failed: {e}"))?;

    Ok(Json(report))
}
