use anyhow::Result;

use kahani::config::Config;
use kahani::logging;
use kahani::rss;

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: test_feed [FEED_URL]");
        std::process::exit(1);
    }

    let config = Config::from_env();
    let url = args.get(1).cloned().unwrap_or_else(|| config.feed_url.clone());

    let http = rss::create_http_client()?;
    let document = rss::fetch_feed(&http, &url).await?;
    let headlines = rss::select_headlines(
        rss::parse_headlines(&document)?,
        rss::MAX_HEADLINE_COUNT,
    );

    println!("Extracted {} headline(s) from {}", headlines.len(), url);
    for (idx, headline) in headlines.iter().enumerate() {
        println!(
            "{:2}. {} [{}] {}",
            idx + 1,
            headline.title,
            headline.source,
            headline.published_at.as_deref().unwrap_or("no date")
        );
    }

    Ok(())
}
