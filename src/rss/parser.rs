//! Structural feed parsing and headline post-processing.

use std::io::Cursor;

use anyhow::Result;
use feed_rs::parser;
use tracing::debug;

use super::types::{
    Headline, DEFAULT_HEADLINE_COUNT, MAX_HEADLINE_COUNT, SOURCE_PLACEHOLDER, TITLE_PLACEHOLDER,
};
use crate::TARGET_WEB_REQUEST;

/// Parse an RSS or Atom document into headlines, preserving document order.
/// Missing titles and sources are replaced with placeholders instead of
/// dropping the entry.
pub fn parse_headlines(document: &str) -> Result<Vec<Headline>> {
    let feed = parser::parse(Cursor::new(document))?;
    debug!(
        target: TARGET_WEB_REQUEST,
        "Parsed feed with {} entries", feed.entries.len()
    );

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| Headline {
            title: entry
                .title
                .map(|t| t.content)
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string()),
            published_at: entry.published.map(|d| d.to_rfc3339()),
            source: entry
                .source
                .filter(|source| !source.trim().is_empty())
                .unwrap_or_else(|| SOURCE_PLACEHOLDER.to_string()),
        })
        .collect())
}

/// Resolve the caller's requested headline count against the default and
/// the hard cap.
pub fn effective_count(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_HEADLINE_COUNT)
        .min(MAX_HEADLINE_COUNT)
}

/// Keep the first `count` headlines and split aggregator attribution out
/// of their titles.
pub fn select_headlines(mut headlines: Vec<Headline>, count: usize) -> Vec<Headline> {
    headlines.truncate(count);
    for headline in &mut headlines {
        split_attribution(headline);
    }
    headlines
}

/// Aggregators bake attribution into titles as "Headline - Source", and the
/// item's own source element does not survive structural parsing, so the
/// title suffix is the only label left. The text before the first " - "
/// stays as the title; the text after the last " - " fills `source` unless
/// the feed already supplied one.
fn split_attribution(headline: &mut Headline) {
    if let Some((title, _)) = headline.title.split_once(" - ") {
        let title = title.trim_end().to_string();
        if headline.source == SOURCE_PLACEHOLDER {
            if let Some((_, publisher)) = headline.title.rsplit_once(" - ") {
                let publisher = publisher.trim();
                if !publisher.is_empty() {
                    headline.source = publisher.to_string();
                }
            }
        }
        headline.title = title;
    }
}
