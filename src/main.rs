use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use kahani::api::{self, AppState};
use kahani::config::Config;
use kahani::gemini::GeminiClient;
use kahani::logging::configure_logging;
use kahani::prompt::TEMPLATE_VERSION;
use kahani::rss;

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();

    let config = Config::from_env();
    info!(
        "Starting kahani (model: {}, fallback: {}, templates: {})",
        config.models.primary,
        config.models.fallback.as_deref().unwrap_or("none"),
        TEMPLATE_VERSION
    );

    let gemini = GeminiClient::new(&config.api_base, config.llm_timeout)?;
    let http = rss::create_http_client()?;

    let state = AppState {
        config: Arc::new(config),
        gemini,
        http,
    };

    api::serve(state).await
}
