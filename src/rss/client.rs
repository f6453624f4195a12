//! HTTP client creation and feed fetching.

use anyhow::Result;
use axum::http::StatusCode;
use thiserror::Error;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use super::types::FEED_REQUEST_TIMEOUT;
use crate::TARGET_WEB_REQUEST;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed answered with status {status}")]
    Status { status: StatusCode },
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed request timed out after {0:?}")]
    Timeout(Duration),
}

/// Create the client used for feed fetching.
pub fn create_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .gzip(true)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

/// Fetch the feed document as text. Non-success statuses are reported as
/// [`FeedError::Status`] so callers can relay them.
pub async fn fetch_feed(http: &reqwest::Client, url: &str) -> Result<String, FeedError> {
    debug!(target: TARGET_WEB_REQUEST, "Fetching news feed from {}", url);

    let response = timeout(FEED_REQUEST_TIMEOUT, http.get(url).send())
        .await
        .map_err(|_| FeedError::Timeout(FEED_REQUEST_TIMEOUT))??;

    let status = response.status();
    if !status.is_success() {
        warn!(target: TARGET_WEB_REQUEST, "Feed {} answered with status {}", url, status);
        return Err(FeedError::Status { status });
    }

    let body = response.text().await?;
    debug!(
        target: TARGET_WEB_REQUEST,
        "Feed {} returned {} bytes", url, body.len()
    );
    Ok(body)
}
