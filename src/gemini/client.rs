//! HTTP client for the generation API.

use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::http::StatusCode;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::types::{GenerateContentRequest, GenerateContentResponse, NO_CANDIDATE_PLACEHOLDER};
use crate::{ModelRoute, TARGET_LLM_REQUEST};

#[derive(Debug, Error)]
pub enum GeminiError {
    /// The API answered with a non-success status for this model.
    #[error("model {model} rejected with status {status}")]
    Status {
        model: String,
        status: StatusCode,
        body: String,
    },
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation request timed out after {0:?}")]
    Timeout(Duration),
}

/// Statuses worth one retry against the fallback model: unknown model,
/// exhausted quota, or upstream overload.
pub fn should_fall_back(status: StatusCode) -> bool {
    matches!(status.as_u16(), 404 | 429 | 503)
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    request_timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_base: &str, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .gzip(true)
            .build()
            .map_err(|err| anyhow!("Failed to build HTTP client: {}", err))?;

        Ok(GeminiClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            request_timeout,
        })
    }

    /// One `generateContent` round trip against a single model. The key
    /// travels as a query parameter, matching the upstream API contract.
    pub async fn generate(
        &self,
        api_key: &str,
        model: &str,
        instruction: &str,
    ) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, model);
        let body = GenerateContentRequest::from_instruction(instruction);

        debug!(
            target: TARGET_LLM_REQUEST,
            "Sending generateContent request to model {} ({} instruction characters)",
            model,
            instruction.chars().count()
        );

        let response = timeout(
            self.request_timeout,
            self.http
                .post(&url)
                .query(&[("key", api_key)])
                .json(&body)
                .send(),
        )
        .await
        .map_err(|_| GeminiError::Timeout(self.request_timeout))??;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                target: TARGET_LLM_REQUEST,
                "Model {} rejected with status {}: {}", model, status, body
            );
            return Err(GeminiError::Status {
                model: model.to_string(),
                status,
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .first_text()
            .unwrap_or(NO_CANDIDATE_PLACEHOLDER)
            .to_string();

        debug!(
            target: TARGET_LLM_REQUEST,
            "Model {} returned {} characters", model, text.len()
        );
        Ok(text)
    }

    /// Generate against the primary model, retrying once on the secondary
    /// when the primary is rejected with a retryable status. Without a
    /// configured secondary the primary's rejection is returned as-is.
    pub async fn generate_with_fallback(
        &self,
        api_key: &str,
        models: &ModelRoute,
        instruction: &str,
    ) -> Result<String, GeminiError> {
        match self.generate(api_key, &models.primary, instruction).await {
            Err(GeminiError::Status {
                model,
                status,
                body,
            }) if should_fall_back(status) => match &models.fallback {
                Some(fallback) => {
                    info!(
                        target: TARGET_LLM_REQUEST,
                        "Model {} rejected with status {}, retrying once with {}",
                        model,
                        status,
                        fallback
                    );
                    self.generate(api_key, fallback, instruction).await
                }
                None => Err(GeminiError::Status {
                    model,
                    status,
                    body,
                }),
            },
            other => other,
        }
    }
}
