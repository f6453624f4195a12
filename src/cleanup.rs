//! Post-processing for generated text.
//!
//! The instruction templates ask for plain text, but models still leak
//! markdown emphasis and heading markers. Handlers scrub those before
//! relaying text to clients.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*|##|\*").expect("valid markdown marker pattern"));

// Indentation before the number is matched with [ \t] rather than \s: in
// multiline mode \s would also swallow the newline of a preceding blank
// line and collapse paragraph breaks.
static LIST_NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d+[.)-]\s+").expect("valid list numbering pattern"));

/// Remove markdown emphasis and heading markers, then trim surrounding
/// whitespace. Interior whitespace and newlines are preserved, and a run of
/// the scrubbed output through this again returns it unchanged.
pub fn scrub_markdown(text: &str) -> String {
    MARKDOWN_MARKERS.replace_all(text, "").trim().to_string()
}

/// Drop leading list numbering ("1. ", "2) ", "3- ") from each line. Models
/// reading a numbered bulletin back tend to echo the numbering.
pub fn strip_list_numbering(text: &str) -> String {
    LIST_NUMBERING.replace_all(text, "").to_string()
}

/// Full cleanup for broadcast scripts: numbering first, then markers.
pub fn clean_script(text: &str) -> String {
    scrub_markdown(&strip_list_numbering(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bold_and_heading_markers() {
        assert_eq!(
            scrub_markdown("** आज की ## बड़ी खबर **"),
            "आज की  बड़ी खबर"
        );
    }

    #[test]
    fn test_strips_single_asterisks() {
        assert_eq!(scrub_markdown("ek * do * teen"), "ek  do  teen");
    }

    #[test]
    fn test_lone_hash_survives() {
        assert_eq!(scrub_markdown("# shirshak"), "# shirshak");
    }

    #[test]
    fn test_trims_outer_whitespace_only() {
        assert_eq!(scrub_markdown("  pehli pankti\n dusri pankti  "), "pehli pankti\n dusri pankti");
    }

    #[test]
    fn test_scrub_is_idempotent() {
        let once = scrub_markdown("**khabar** aur *vistar* ## ant");
        assert_eq!(scrub_markdown(&once), once);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(scrub_markdown(""), "");
        assert_eq!(scrub_markdown("   "), "");
    }

    #[test]
    fn test_strip_list_numbering_all_styles() {
        let script = "1. pehli khabar\n2) dusri khabar\n3- teesri khabar";
        assert_eq!(
            strip_list_numbering(script),
            "pehli khabar\ndusri khabar\nteesri khabar"
        );
    }

    #[test]
    fn test_numbering_inside_a_line_is_kept() {
        assert_eq!(
            strip_list_numbering("raat 8. 30 baje prasaran"),
            "raat 8. 30 baje prasaran"
        );
    }

    #[test]
    fn test_indented_numbering_is_stripped() {
        assert_eq!(
            strip_list_numbering("  1. pehli khabar\n\t2) dusri khabar"),
            "pehli khabar\ndusri khabar"
        );
    }

    #[test]
    fn test_numbering_strip_keeps_paragraph_breaks() {
        assert_eq!(
            strip_list_numbering("pehla anuchchhed\n\n1. agli khabar"),
            "pehla anuchchhed\n\nagli khabar"
        );
    }

    #[test]
    fn test_clean_script_combines_both() {
        assert_eq!(
            clean_script("1. **pehli** khabar\n2. dusri ## khabar\n"),
            "pehli khabar\ndusri  khabar"
        );
    }
}
