pub mod api;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod prompt;
pub mod rss;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";

/// Primary model plus the optional secondary tried once when the primary
/// is rejected with a retryable status.
#[derive(Clone, Debug)]
pub struct ModelRoute {
    pub primary: String,
    pub fallback: Option<String>,
}

impl ModelRoute {
    pub fn new(primary: impl Into<String>, fallback: Option<String>) -> Self {
        ModelRoute {
            primary: primary.into(),
            fallback,
        }
    }
}
