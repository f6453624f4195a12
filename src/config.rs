//! Runtime configuration, collected once at startup.
//!
//! Every knob is read from the environment in one place so handlers never
//! touch `env::var` themselves. A missing API key is not fatal at boot: the
//! server still answers, and generation requests fail with a configuration
//! error until the key is provided.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::ModelRoute;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_FEED_URL: &str = "https://news.google.com/rss?hl=hi-IN&gl=IN&ceid=IN:hi";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
pub struct Config {
    /// Credential for the generation API. Checked per request, not at boot.
    pub api_key: Option<String>,
    pub api_base: String,
    pub models: ModelRoute,
    /// Feed polled for headlines by the news endpoint.
    pub feed_url: String,
    pub port: u16,
    /// Upper bound on a single generation round trip.
    pub llm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Config {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; generation requests will fail until it is provided");
        }

        let models = ModelRoute::new(
            env_or("GEMINI_MODEL", DEFAULT_MODEL),
            env::var("GEMINI_FALLBACK_MODEL")
                .ok()
                .filter(|model| !model.trim().is_empty()),
        );

        let feed_url = env_or("NEWS_FEED_URL", DEFAULT_FEED_URL);
        let feed_url = if is_valid_url(&feed_url) {
            feed_url
        } else {
            warn!(
                "NEWS_FEED_URL {} is not a valid http(s) URL, using the default feed",
                feed_url
            );
            DEFAULT_FEED_URL.to_string()
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let llm_timeout = env::var("LLM_REQUEST_TIMEOUT")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_LLM_TIMEOUT);

        Config {
            api_key,
            api_base: env_or("GEMINI_API_BASE", DEFAULT_API_BASE),
            models,
            feed_url,
            port,
            llm_timeout,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn env_or(var: &str, default: &str) -> String {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Helper function to validate a URL
fn is_valid_url(url: &str) -> bool {
    if let Ok(parsed) = url::Url::parse(url) {
        parsed.scheme() == "http" || parsed.scheme() == "https"
    } else {
        false
    }
}
