use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request-shape problem (missing field, bad encoding, malformed
    /// multipart). Maps to 422.
    #[error("invalid request: {detail}")]
    Validation { detail: String, body: String },

    /// Anything that escapes the scoring pipeline. Maps to 500.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    pub fn validation(detail: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
            body: body.into(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ValidationResponse {
    pub detail: String,
    pub body: String,
}

#[derive(serde::Serialize)]
pub struct InternalErrorResponse {
    pub error: String,
    pub r#type: String,
    pub traceback_tail: Vec<String>,
}

/// Entries of the error source chain surfaced in a 500 body.
const TRACEBACK_TAIL_LEN: usize = 5;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Validation { detail, body } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse { detail, body }),
            )
                .into_response(),
            GatewayError::Internal(err) => {
                let traceback_tail: Vec<String> = err
                    .chain()
                    .skip(1)
                    .take(TRACEBACK_TAIL_LEN)
                    .map(|cause| cause.to_string())
                    .collect();

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InternalErrorResponse {
                        error: err.to_string(),
                        r#type: "internal_error".to_string(),
                        traceback_tail,
                    }),
                )
                    .into_response()
            }
        }
    }
}
