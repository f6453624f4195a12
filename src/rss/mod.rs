//! News-feed fetching and headline extraction.
//!
//! The feed is read structurally (RSS and Atom both parse) and reduced to
//! the handful of fields the news endpoint relays to clients.

mod client;
mod parser;
mod types;

pub use self::types::*;

pub use self::client::{create_http_client, fetch_feed, FeedError};
pub use self::parser::{effective_count, parse_headlines, select_headlines};
