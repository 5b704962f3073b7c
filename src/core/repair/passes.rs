//! Separator-insertion passes.
//!
//! Each pass is a pure text -> text rewrite over adjacent line pairs. Line
//! shapes are classified with compiled patterns; insertion itself is an
//! explicit line walk, which keeps the adjacency rules readable and avoids
//! lookaround constructs the regex engine does not support.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Pipe-delimited table row: `| a | b |`
    static ref TABLE_ROW: Regex = Regex::new(r"^\s*\|.*\|\s*$").unwrap();
    /// Single-column alignment separator, e.g. `|---|`
    static ref ALIGNMENT_ROW: Regex = Regex::new(r"^\s*\|[\s:-]*\|\s*$").unwrap();
    /// List item or heading immediately following a table row
    static ref BLOCK_AFTER_TABLE: Regex = Regex::new(r"^\s*(?:[*+-]|\d+\.|#+)\s+.*$").unwrap();
    /// Bulleted or numbered list item (marker followed by whitespace)
    static ref LIST_ITEM: Regex = Regex::new(r"^[ \t]*(?:[*+-]|\d+\.)\s+").unwrap();
    /// ATX heading line
    static ref HEADING: Regex = Regex::new(r"^[ \t]*#+\s+").unwrap();
    /// Anything that opens like a table row
    static ref TABLE_START: Regex = Regex::new(r"^[ \t]*\|").unwrap();
    /// Block quote line
    static ref QUOTE: Regex = Regex::new(r"^[ \t]*>").unwrap();
    /// Thematic break
    static ref THEMATIC_BREAK: Regex = Regex::new(r"^[ \t]*(?:---|\*\*\*|___)[ \t]*$").unwrap();
    /// Fenced-code boundary
    static ref FENCE: Regex = Regex::new(r"^[ \t]*(?:```|~~~)").unwrap();
    /// Indented line (potential list continuation)
    static ref INDENTED: Regex = Regex::new(r"^[ \t]+").unwrap();
    /// Bold-wrapped heading text: `## **Title**`
    static ref HEADING_BOLD: Regex = Regex::new(r"(?m)^(#+)\s*\*\*(.*?)\*\*").unwrap();
}

/// Strip emphasis markers wrapped around heading text; renderers emit
/// nested strong tags for them and export styling doubles up.
pub fn normalize_heading_emphasis(text: &str) -> String {
    HEADING_BOLD.replace_all(text, "$1 $2").into_owned()
}

/// Pass 1: a table row preceded by a non-blank line that is not itself a
/// table row or alignment separator gains a blank line before it.
pub fn separate_table_start(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 4);
    for (i, line) in lines.iter().enumerate() {
        if i > 0 && TABLE_ROW.is_match(line) {
            let prev = lines[i - 1].trim();
            let prev_is_table = TABLE_ROW.is_match(prev) || ALIGNMENT_ROW.is_match(prev);
            if !prev.is_empty() && !prev_is_table {
                out.push("");
            }
        }
        out.push(line);
    }
    out.join("\n")
}

/// Pass 2: reserved normalization over alignment-separator rows.
///
/// Performs no textual change; the stage is kept so the pass ordering and
/// per-pass reporting stay uniform with the pipeline this replaces.
pub fn normalize_separator_spacing(text: &str) -> String {
    text.to_string()
}

/// Pass 3: a table row immediately followed by a list item or heading
/// gains a blank line between them.
pub fn separate_table_from_block(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 4);
    for (i, line) in lines.iter().enumerate() {
        out.push(line);
        if let Some(next) = lines.get(i + 1) {
            if TABLE_ROW.is_match(line) && BLOCK_AFTER_TABLE.is_match(next) {
                out.push("");
            }
        }
    }
    out.join("\n")
}

/// Pass 4: a paragraph-like line immediately followed by a list item or
/// heading gains a blank line between them.
pub fn separate_block_start(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 4);
    for (i, line) in lines.iter().enumerate() {
        out.push(line);
        if let Some(next) = lines.get(i + 1) {
            let next_is_list = LIST_ITEM.is_match(next);
            if (next_is_list || HEADING.is_match(next))
                && qualifies_as_paragraph(line, next_is_list)
            {
                out.push("");
            }
        }
    }
    out.join("\n")
}

/// A line counts as the "preceding paragraph" only when it is none of the
/// structural shapes that already separate themselves, and is not an
/// indented continuation of the list it precedes.
fn qualifies_as_paragraph(line: &str, next_is_list: bool) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    if LIST_ITEM.is_match(line) || HEADING.is_match(line) {
        return false;
    }
    if TABLE_START.is_match(line) || QUOTE.is_match(line) {
        return false;
    }
    if THEMATIC_BREAK.is_match(line) || FENCE.is_match(line) {
        return false;
    }
    if next_is_list && INDENTED.is_match(line) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_start_gains_blank_line() {
        let input = "para\n|a|b|\n";
        assert_eq!(separate_table_start(input), "para\n\n|a|b|\n");
    }

    #[test]
    fn test_contiguous_table_rows_unchanged() {
        let input = "|a|b|\n|---|---|\n|1|2|\n";
        assert_eq!(separate_table_start(input), input);
    }

    #[test]
    fn test_already_separated_table_unchanged() {
        let input = "para\n\n|a|b|\n|---|---|\n";
        assert_eq!(separate_table_start(input), input);
    }

    #[test]
    fn test_separator_pass_is_a_no_op() {
        let input = "| a |\n|---|\n| 1 |\nanything";
        assert_eq!(normalize_separator_spacing(input), input);
    }

    #[test]
    fn test_table_then_list_gains_blank_line() {
        assert_eq!(separate_table_from_block("|a|b|\n- item"), "|a|b|\n\n- item");
    }

    #[test]
    fn test_table_then_heading_gains_blank_line() {
        assert_eq!(
            separate_table_from_block("|a|b|\n## next"),
            "|a|b|\n\n## next"
        );
    }

    #[test]
    fn test_table_then_paragraph_is_unchanged() {
        let input = "|a|b|\nSome text";
        assert_eq!(separate_table_from_block(input), input);
    }

    #[test]
    fn test_table_then_numbered_item_gains_blank_line() {
        assert_eq!(separate_table_from_block("|a|b|\n1. item"), "|a|b|\n\n1. item");
    }

    #[test]
    fn test_number_followed_by_text_is_not_a_list() {
        // "1.5 units" is prose, not a numbered item.
        let input = "|a|b|\n1.5 units";
        assert_eq!(separate_table_from_block(input), input);
    }

    #[test]
    fn test_paragraph_then_list_gains_blank_line() {
        assert_eq!(separate_block_start("intro\n- item"), "intro\n\n- item");
    }

    #[test]
    fn test_paragraph_then_heading_gains_blank_line() {
        assert_eq!(separate_block_start("intro\n# title"), "intro\n\n# title");
    }

    #[test]
    fn test_list_item_then_list_item_is_unchanged() {
        let input = "- one\n- two";
        assert_eq!(separate_block_start(input), input);
    }

    #[test]
    fn test_indented_continuation_does_not_trigger() {
        let input = "- one\n  continued line\n- two";
        assert_eq!(separate_block_start(input), input);
    }

    #[test]
    fn test_quote_rule_and_fence_do_not_trigger() {
        for input in ["> quoted\n- item", "---\n- item", "```\n- item"] {
            assert_eq!(separate_block_start(input), input);
        }
    }

    #[test]
    fn test_heading_emphasis_is_stripped() {
        assert_eq!(
            normalize_heading_emphasis("## **Bold Title**\ntext **stays**"),
            "## Bold Title\ntext **stays**"
        );
    }
}
