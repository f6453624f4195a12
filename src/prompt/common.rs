use chrono::Utc;
use chrono_tz::Asia::Kolkata;

// Common text blocks for all templates
pub const PLAIN_TEXT_RULE: &str = "Plain Text only (no markdown markers like ** or ##).";

/// How many trailing characters of story history the continuation template
/// keeps as context.
pub const HISTORY_TAIL_CHARS: usize = 1000;

/// Today's date rendered in IST, the audience timezone. News-style templates
/// pin the date so models do not reach for stale training-data headlines.
pub fn current_date_ist() -> String {
    let today = Utc::now().with_timezone(&Kolkata);
    today.format("%A, %e %B %Y, %I:%M %p").to_string()
}

/// Trailing slice of `history`, at most `max_chars` characters. Cuts on a
/// character boundary so Devanagari and other multi-byte text stays intact.
pub fn history_tail(history: &str, max_chars: usize) -> &str {
    let total = history.chars().count();
    if total <= max_chars {
        return history;
    }
    // nth returns None only when the skip spans the whole string, which
    // happens exactly when max_chars is zero; the tail is then empty.
    let start = history
        .char_indices()
        .nth(total - max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(history.len());
    &history[start..]
}
