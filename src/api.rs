//! The HTTP surface: routing, request validation, and the two generation
//! handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::cleanup::{clean_script, scrub_markdown};
use crate::config::Config;
use crate::error::ApiError;
use crate::gemini::GeminiClient;
use crate::prompt;
use crate::rss::{self, Headline};
use crate::TARGET_WEB_REQUEST;

/// Script returned when the feed yields nothing to narrate. No generation
/// request is made in that case.
const EMPTY_FEED_SCRIPT: &str =
    "Namaskar. Is samay news feed se koi taaza khabar nahi mil payi. Thodi der baad phir koshish karein.";

/// Script length instruction used when the caller does not send one.
const DEFAULT_SCRIPT_LINES: &str = "3 lines";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini: GeminiClient,
    pub http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub history: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated_text: String,
}

#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub lines: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub metadata: Vec<Headline>,
    pub script: String,
}

/// Build the application router with its CORS policy and shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/generate", post(generate))
        .route("/api/generate-news", post(generate_news))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.listen_addr();
    let app = router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Liveness check. Names the active model so a glance at the banner shows
/// what deployment is answering.
async fn liveness(State(state): State<AppState>) -> String {
    format!(
        "KahaniBox AI Server is Running! 🚀 (Active: {})",
        state.config.models.primary
    )
}

async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = field_text(&request.prompt);
    let history = field_text(&request.history);

    if prompt.is_empty() && history.is_empty() {
        return Err(ApiError::Validation("Prompt is required".to_string()));
    }
    let api_key = require_api_key(&state.config)?;

    let mode = prompt::classify(prompt, history);
    info!(
        target: TARGET_WEB_REQUEST,
        "Generate request classified as {:?} ({} prompt chars, {} history chars)",
        mode,
        prompt.chars().count(),
        history.chars().count()
    );

    let instruction = prompt::build_instruction(mode, prompt, history);
    let raw = state
        .gemini
        .generate_with_fallback(api_key, &state.config.models, &instruction)
        .await?;

    Ok(Json(GenerateResponse {
        generated_text: scrub_markdown(&raw),
    }))
}

async fn generate_news(
    State(state): State<AppState>,
    Json(request): Json<NewsRequest>,
) -> Result<Json<NewsResponse>, ApiError> {
    let api_key = require_api_key(&state.config)?;

    let count = rss::effective_count(request.count);
    let document = rss::fetch_feed(&state.http, &state.config.feed_url).await?;
    let headlines = rss::select_headlines(rss::parse_headlines(&document)?, count);

    if headlines.is_empty() {
        info!(
            target: TARGET_WEB_REQUEST,
            "Feed produced no headlines, answering with the empty-feed script"
        );
        return Ok(Json(NewsResponse {
            metadata: Vec::new(),
            script: EMPTY_FEED_SCRIPT.to_string(),
        }));
    }

    let lines = request
        .lines
        .as_deref()
        .map(str::trim)
        .filter(|lines| !lines.is_empty())
        .unwrap_or(DEFAULT_SCRIPT_LINES);

    info!(
        target: TARGET_WEB_REQUEST,
        "Narrating {} headline(s) within {}", headlines.len(), lines
    );

    let instruction = prompt::news_script_instruction(&headlines, lines);
    let raw = state
        .gemini
        .generate_with_fallback(api_key, &state.config.models, &instruction)
        .await?;

    Ok(Json(NewsResponse {
        metadata: headlines,
        script: clean_script(&raw),
    }))
}

/// Trimmed text of an optional request field. Whitespace-only values count
/// as absent.
fn field_text(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

fn require_api_key(config: &Config) -> Result<&str, ApiError> {
    config
        .api_key
        .as_deref()
        .ok_or_else(|| ApiError::Configuration("Server Error: API Key is missing".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelRoute;
    use axum::http::StatusCode;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn config_with_key(api_key: Option<&str>) -> Config {
        Config {
            api_key: api_key.map(str::to_string),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            models: ModelRoute::new("gemini-1.5-flash", None),
            feed_url: "https://news.google.com/rss".to_string(),
            port: 8080,
            llm_timeout: Duration::from_secs(5),
        }
    }

    fn state_with(config: Config) -> AppState {
        let gemini = GeminiClient::new(&config.api_base, config.llm_timeout).unwrap();
        AppState {
            config: Arc::new(config),
            gemini,
            http: reqwest::Client::new(),
        }
    }

    const STUB_STORY: &str = "  **Ek raja tha.**\n## Adhyay Ek\nUski ek *jaadui* chidiya thi.  ";
    const STUB_SCRIPT: &str = "1. **Sansad** ki khabar\n2. Mausam ki chetavani";
    const STUB_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Taaza Khabar</title>
    <link>https://news.example.com</link>
    <description>Stub feed</description>
    <item>
      <title>Sansad mein naya vidheyak pass - Dainik Times</title>
      <link>https://news.example.com/1</link>
      <pubDate>Sat, 22 Aug 2026 06:30:00 GMT</pubDate>
    </item>
    <item>
      <title>Mausam vibhag ki chetavani - Mausam Patrika</title>
      <link>https://news.example.com/2</link>
      <pubDate>Sat, 22 Aug 2026 05:10:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    /// Loopback stand-in for the generation API and the news feed. Any
    /// model answers with `generated`; `/feed` serves [`STUB_FEED`].
    async fn spawn_stub_services(generated: &'static str) -> String {
        let app = Router::new()
            .route(
                "/models/{target}",
                post(move || async move {
                    Json(json!({
                        "candidates": [{ "content": { "parts": [{ "text": generated }] } }]
                    }))
                }),
            )
            .route("/feed", get(|| async { STUB_FEED }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });
        base
    }

    async fn serve_app(state: AppState) -> String {
        let app = router(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });
        base
    }

    #[tokio::test]
    async fn test_generate_rejects_an_empty_request() {
        let state = state_with(config_with_key(Some("secret")));
        let err = generate(
            State(state),
            Json(GenerateRequest {
                prompt: Some("   ".to_string()),
                history: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Prompt is required");
    }

    #[tokio::test]
    async fn test_generate_requires_the_api_key() {
        let state = state_with(config_with_key(None));
        let err = generate(
            State(state),
            Json(GenerateRequest {
                prompt: Some("ek kahani sunao".to_string()),
                history: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_generate_news_requires_the_api_key() {
        let state = state_with(config_with_key(None));
        let err = generate_news(
            State(state),
            Json(NewsRequest {
                count: None,
                lines: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_generate_round_trip_returns_clean_text() {
        let upstream = spawn_stub_services(STUB_STORY).await;
        let mut config = config_with_key(Some("test-key"));
        config.api_base = upstream;
        let app = serve_app(state_with(config)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/generate", app))
            .json(&json!({ "prompt": "ek kahani sunao" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        let text = body["generated_text"].as_str().unwrap();
        assert!(text.starts_with("Ek raja tha."));
        assert!(!text.contains('*'));
        assert!(!text.contains('#'));
    }

    #[tokio::test]
    async fn test_generate_news_round_trip() {
        let upstream = spawn_stub_services(STUB_SCRIPT).await;
        let mut config = config_with_key(Some("test-key"));
        config.feed_url = format!("{}/feed", upstream);
        config.api_base = upstream;
        let app = serve_app(state_with(config)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/generate-news", app))
            .json(&json!({ "count": 2, "lines": "2 lines" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        let metadata = body["metadata"].as_array().unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[0]["title"], "Sansad mein naya vidheyak pass");
        assert_eq!(metadata[0]["source"], "Dainik Times");
        assert_eq!(body["script"], "Sansad ki khabar\nMausam ki chetavani");
    }

    #[tokio::test]
    async fn test_generate_news_relays_a_feed_failure() {
        let upstream = spawn_stub_services(STUB_SCRIPT).await;
        let mut config = config_with_key(Some("test-key"));
        config.feed_url = format!("{}/no-such-feed", upstream);
        config.api_base = upstream;
        let app = serve_app(state_with(config)).await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/generate-news", app))
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 404);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("404"));
    }

    #[test]
    fn test_field_text_trims_and_defaults() {
        assert_eq!(field_text(&Some("  kahani  ".to_string())), "kahani");
        assert_eq!(field_text(&Some("   ".to_string())), "");
        assert_eq!(field_text(&None), "");
    }

    #[test]
    fn test_missing_key_is_a_configuration_error() {
        let config = config_with_key(None);
        let err = require_api_key(&config).unwrap_err();
        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(err.to_string(), "Server Error: API Key is missing");
    }

    #[test]
    fn test_present_key_is_returned() {
        let config = config_with_key(Some("secret"));
        assert_eq!(require_api_key(&config).ok(), Some("secret"));
    }

    #[test]
    fn test_request_fields_are_optional_in_json() {
        let request: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.prompt.is_none());
        assert!(request.history.is_none());

        let request: NewsRequest = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert_eq!(request.count, Some(7));
        assert!(request.lines.is_none());
    }

    #[test]
    fn test_news_response_serializes_snake_case() {
        let response = NewsResponse {
            metadata: vec![Headline {
                title: "Shirshak".to_string(),
                published_at: Some("2026-08-22T06:30:00+00:00".to_string()),
                source: "Dainik Times".to_string(),
            }],
            script: "Namaskar.".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["metadata"][0]["published_at"], "2026-08-22T06:30:00+00:00");
        assert_eq!(json["script"], "Namaskar.");
    }
}
