//! Table structure analysis and width-handling styles.
//!
//! The renderer collaborator produces well-formed, non-nested `<table>`
//! elements; a best-effort scan is enough to size them. Malformed markup
//! yields an undercount or zero, never an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::theme::DEFAULT_LIGHT_THEME;

lazy_static! {
    static ref TABLE_BLOCK: Regex = Regex::new(r"(?s)<table[^>]*>(.*?)</table>").unwrap();
    static ref FIRST_ROW: Regex = Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").unwrap();
    static ref CELL_OPEN: Regex = Regex::new(r"<t[hd][^>]*>").unwrap();
}

/// Strategy for visually compressing or wrapping wide tables.
///
/// Selects a styling strategy only; the table text is never transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableHandling {
    #[default]
    SmartFit,
    SmallerFont,
    BreakWords,
}

/// Page orientation, as far as this core cares: it shifts the smart-fit
/// column thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Maximum header-row cell count across all tables in the markup.
pub fn max_header_columns(html: &str) -> usize {
    TABLE_BLOCK
        .captures_iter(html)
        .filter_map(|table| {
            let body = table.get(1)?.as_str();
            let header = FIRST_ROW.captures(body)?;
            Some(CELL_OPEN.find_iter(header.get(1)?.as_str()).count())
        })
        .max()
        .unwrap_or(0)
}

/// Derive the table styling fragment for one document.
///
/// Pure function of (column count, policy, orientation, theme identity).
/// The header background is only set for the built-in light theme; any
/// other theme keeps full control of its table colors.
pub fn table_style(
    columns: usize,
    handling: TableHandling,
    orientation: Orientation,
    theme: &str,
) -> String {
    let th_bg = if theme == DEFAULT_LIGHT_THEME {
        "background-color: #f4f4f4; "
    } else {
        ""
    };

    let base = format!(
        "table {{ border-collapse: collapse; width: 100%; margin: 1em 0; page-break-inside: avoid; }} \
th, td {{ border: 1px solid #ddd; text-align: left; vertical-align: top; padding: 8px; }} \
th {{ {}font-weight: bold; }}",
        th_bg
    );

    let extra = match handling {
        TableHandling::SmartFit => {
            let landscape = orientation == Orientation::Landscape;
            if columns > 8 || (columns > 6 && !landscape) {
                "table { font-size: 0.7em; } th, td { padding: 4px 6px; word-wrap: break-word; hyphens: auto; max-width: 120px; min-width: 60px; }"
            } else if columns > 5 || (columns > 4 && !landscape) {
                "table { font-size: 0.85em; } th, td { padding: 6px 8px; word-wrap: break-word; hyphens: auto; max-width: 150px; }"
            } else {
                "th, td { word-wrap: break-word; hyphens: auto; }"
            }
        }
        TableHandling::SmallerFont => {
            "table { font-size: 0.7em; } th, td { padding: 4px 6px; word-wrap: break-word; hyphens: auto; }"
        }
        TableHandling::BreakWords => {
            "table { table-layout: fixed; } th, td { word-wrap: break-word; word-break: break-all; hyphens: auto; overflow-wrap: break-word; }"
        }
    };

    format!("{}{}", base, extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cells: usize) -> String {
        let header: String = (0..cells).map(|i| format!("<th>c{}</th>", i)).collect();
        format!("<table><thead><tr>{}</tr></thead></table>", header)
    }

    #[test]
    fn test_counts_header_cells() {
        assert_eq!(max_header_columns(&table(4)), 4);
    }

    #[test]
    fn test_takes_maximum_across_tables() {
        let html = format!("{}\n<p>between</p>\n{}", table(3), table(7));
        assert_eq!(max_header_columns(&html), 7);
    }

    #[test]
    fn test_counts_td_headers_too() {
        let html = "<table><tr><td>a</td><td>b</td></tr><tr><td>1</td></tr></table>";
        assert_eq!(max_header_columns(html), 2);
    }

    #[test]
    fn test_no_tables_is_zero() {
        assert_eq!(max_header_columns("<p>no tables here</p>"), 0);
        assert_eq!(max_header_columns(""), 0);
    }

    #[test]
    fn test_malformed_table_is_best_effort() {
        // Unclosed table: the block scan finds nothing, and that is fine.
        assert_eq!(max_header_columns("<table><tr><th>a</th></tr>"), 0);
    }

    #[test]
    fn test_smart_fit_compact_bracket_is_orientation_sensitive() {
        let compact = table_style(
            9,
            TableHandling::SmartFit,
            Orientation::Portrait,
            DEFAULT_LIGHT_THEME,
        );
        assert!(compact.contains("font-size: 0.7em"));
        assert!(compact.contains("min-width: 60px"));

        // Seven columns are compact in portrait but only medium in landscape.
        let portrait = table_style(
            7,
            TableHandling::SmartFit,
            Orientation::Portrait,
            DEFAULT_LIGHT_THEME,
        );
        assert!(portrait.contains("font-size: 0.7em"));
        let landscape = table_style(
            7,
            TableHandling::SmartFit,
            Orientation::Landscape,
            DEFAULT_LIGHT_THEME,
        );
        assert!(landscape.contains("font-size: 0.85em"));
    }

    #[test]
    fn test_smart_fit_narrow_is_word_wrap_only() {
        let css = table_style(
            5,
            TableHandling::SmartFit,
            Orientation::Landscape,
            DEFAULT_LIGHT_THEME,
        );
        assert!(!css.contains("font-size"));
        assert!(css.contains("word-wrap: break-word"));
    }

    #[test]
    fn test_smaller_font_ignores_column_count() {
        let css = table_style(
            1,
            TableHandling::SmallerFont,
            Orientation::Landscape,
            DEFAULT_LIGHT_THEME,
        );
        assert!(css.contains("font-size: 0.7em"));
        assert!(!css.contains("max-width"));
    }

    #[test]
    fn test_break_words_uses_fixed_layout() {
        let css = table_style(
            12,
            TableHandling::BreakWords,
            Orientation::Portrait,
            DEFAULT_LIGHT_THEME,
        );
        assert!(css.contains("table-layout: fixed"));
        assert!(css.contains("word-break: break-all"));
    }

    #[test]
    fn test_header_background_only_for_default_light_theme() {
        let light = table_style(
            3,
            TableHandling::SmartFit,
            Orientation::Portrait,
            DEFAULT_LIGHT_THEME,
        );
        assert!(light.contains("background-color: #f4f4f4"));

        let dark = table_style(
            3,
            TableHandling::SmartFit,
            Orientation::Portrait,
            "github_dark.css",
        );
        assert!(!dark.contains("background-color: #f4f4f4"));
    }

    #[test]
    fn test_policy_names_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&TableHandling::SmartFit).unwrap(),
            "\"smart_fit\""
        );
        assert_eq!(
            serde_json::to_string(&Orientation::Landscape).unwrap(),
            "\"landscape\""
        );
    }
}
