//! The instruction templates, one per prompt mode.
//!
//! Earlier revisions scattered near-duplicate template strings through the
//! handlers. This table is the single consolidated set; bump
//! [`TEMPLATE_VERSION`] whenever the wording changes so prompt drift shows
//! up in logs.

use super::common::{current_date_ist, history_tail, HISTORY_TAIL_CHARS, PLAIN_TEXT_RULE};
use super::PromptMode;
use crate::rss::Headline;

pub const TEMPLATE_VERSION: &str = "v6";

/// Render the instruction for a generation request. `topic` feeds the
/// narrative and informational templates, `history` the continuation one;
/// the unused argument is ignored.
pub fn build_instruction(mode: PromptMode, topic: &str, history: &str) -> String {
    match mode {
        PromptMode::Continuation => continuation_instruction(history),
        PromptMode::Informational => headlines_instruction(topic),
        PromptMode::Narrative => story_instruction(topic),
    }
}

fn continuation_instruction(history: &str) -> String {
    format!(
        r#"Role: Professional Writer.
Task: Continue the story naturally.
Context: "{context}"
Instruction: Write next 300-400 words in Hindi. Maintain flow.
Formatting: {plain_text}"#,
        context = history_tail(history, HISTORY_TAIL_CHARS),
        plain_text = PLAIN_TEXT_RULE,
    )
}

fn headlines_instruction(topic: &str) -> String {
    format!(
        r#"Role: Senior News Anchor (India).
Task: Give Top Verified News Headlines.
Date: {date} (News MUST be fresh).
Topic: {topic}

Rules:
1. Source: Verified channels only.
2. Format: "Headline" followed by details.
3. Language: Hindi.
4. Formatting: {plain_text}"#,
        date = current_date_ist(),
        topic = topic,
        plain_text = PLAIN_TEXT_RULE,
    )
}

fn story_instruction(topic: &str) -> String {
    format!(
        r#"Role: Best Hindi Storyteller.
Topic: {topic}
Task: Write a viral-quality story/script (400-500 words).
Language: Hindi.
Formatting: {plain_text}"#,
        topic = topic,
        plain_text = PLAIN_TEXT_RULE,
    )
}

/// Instruction for narrating already-extracted headlines as one broadcast
/// script. The headlines arrive numbered so the model keeps their order;
/// the numbering it echoes back is stripped during cleanup.
pub fn news_script_instruction(headlines: &[Headline], lines: &str) -> String {
    let bulletin = headlines
        .iter()
        .enumerate()
        .map(|(idx, headline)| format!("{}. {} ({})", idx + 1, headline.title, headline.source))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Role: Senior News Anchor (India).
Task: Read these verified headlines as one continuous broadcast script.
Date: {date}.
Headlines:
{bulletin}

Rules:
1. Keep the script within {lines}.
2. Smooth anchor-style transitions, at most one opening line.
3. Language: Hindi.
4. Formatting: {plain_text}"#,
        date = current_date_ist(),
        bulletin = bulletin,
        lines = lines,
        plain_text = PLAIN_TEXT_RULE,
    )
}
