//! Error taxonomy for the HTTP surface.
//!
//! Four families, each with a fixed status mapping: caller mistakes answer
//! 400, a missing credential answers 500 before any outbound call, upstream
//! rejections keep the upstream status, and everything else answers 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::gemini::GeminiError;
use crate::rss::FeedError;
use crate::TARGET_WEB_REQUEST;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body failed validation. Answered before any outbound call.
    #[error("{0}")]
    Validation(String),
    /// The server is missing configuration it needs for this request.
    #[error("{0}")]
    Configuration(String),
    /// An upstream dependency rejected the request; its status is relayed.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    /// Anything else. Details go to the log, a generic message to the client.
    #[error("Internal Server Error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!(target: TARGET_WEB_REQUEST, "Request failed with {}: {}", status, self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<GeminiError> for ApiError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Status {
                model,
                status,
                body,
            } => ApiError::Upstream {
                status,
                message: upstream_message(&model, status, &body),
            },
            other => ApiError::Unexpected(anyhow::Error::new(other)),
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Status { status } => ApiError::Upstream {
                status,
                message: format!("News feed request failed with status {}", status),
            },
            other => ApiError::Unexpected(anyhow::Error::new(other)),
        }
    }
}

/// Client-facing wording for the common generation-API rejections.
fn upstream_message(model: &str, status: StatusCode, body: &str) -> String {
    match status.as_u16() {
        404 => format!(
            "Model Not Found: '{}' was rejected, check the configured model name.",
            model
        ),
        429 => "Limit Exceeded: Server is busy, try again in 1 minute.".to_string(),
        _ => format!("AI Error: {}", body),
    }
}
