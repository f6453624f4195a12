//! Prompt classification and instruction construction.

mod common;
mod templates;

pub use common::{current_date_ist, history_tail, HISTORY_TAIL_CHARS, PLAIN_TEXT_RULE};
pub use templates::{build_instruction, news_script_instruction, TEMPLATE_VERSION};

/// Which instruction template a generation request gets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PromptMode {
    /// Continue an in-progress story from its history.
    Continuation,
    /// Fresh news headlines on the requested topic.
    Informational,
    /// A new story on the requested topic.
    Narrative,
}

/// Keywords that route a prompt to the informational template. Matched
/// case-insensitively anywhere in the prompt.
const NEWS_KEYWORDS: [&str; 3] = ["news", "khabar", "samachar"];

/// Pick the template for a request. History always wins: a request carrying
/// story history is a continuation even when its prompt mentions news.
pub fn classify(prompt: &str, history: &str) -> PromptMode {
    if !history.is_empty() {
        return PromptMode::Continuation;
    }

    let lowered = prompt.to_lowercase();
    if NEWS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        PromptMode::Informational
    } else {
        PromptMode::Narrative
    }
}
