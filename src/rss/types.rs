//! Type definitions for the news-feed module.

use serde::Serialize;
use tokio::time::Duration;

/// One extracted feed item. Relayed to clients verbatim as the metadata
/// accompanying a generated script.
#[derive(Debug, Clone, Serialize)]
pub struct Headline {
    pub title: String,
    /// RFC 3339 publication timestamp, when the feed carried one.
    pub published_at: Option<String>,
    pub source: String,
}

pub const FEED_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Headlines narrated when the caller does not ask for a count.
pub const DEFAULT_HEADLINE_COUNT: usize = 5;

/// Hard cap on requested headlines, keeps instructions bounded.
pub const MAX_HEADLINE_COUNT: usize = 20;

pub const TITLE_PLACEHOLDER: &str = "Untitled story";
pub const SOURCE_PLACEHOLDER: &str = "Unknown source";
