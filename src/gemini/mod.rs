//! Client and wire types for the hosted generation API.

mod client;
mod types;

pub use self::client::{should_fall_back, GeminiClient, GeminiError};
pub use self::types::*;
