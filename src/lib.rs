//! Markpress - Markdown repair, glyph inlining and print-ready HTML assembly
//!
//! Markpress is the content transformation core of a Markdown-to-PDF
//! workflow. It takes loosely-formatted Markdown and produces a normalized,
//! style-annotated HTML document ready for a paginating exporter:
//!
//! - **Structural repair** inserts the blank-line separators CommonMark
//!   renderers require around tables, lists and headings, as
//!   fixpoint-iterated rewrite passes with a hard iteration cap.
//! - **Glyph substitution** replaces pictographic glyphs with sanitized,
//!   base64-embedded SVG fragments resolved from an icon asset tree, using
//!   a longest-match tokenizer and a compute-once per-glyph cache.
//! - **Table analysis** scans the rendered markup, counts header columns
//!   and derives width-handling CSS from a policy and the page orientation.
//! - The **converter** orchestrates the above around a pluggable renderer
//!   collaborator and assembles theme CSS, generated styles and the body
//!   into the final document.
//!
//! Every degradable failure (missing asset, unreadable mapping, broken
//! theme) falls back to a documented behavior instead of aborting.
//!
//! ```no_run
//! use markpress::{ConvertOptions, Converter, GlyphEngine, ThemeStore};
//!
//! let glyphs = GlyphEngine::new(
//!     markpress::load_mapping(std::path::Path::new("assets/emoji_mapping.json")),
//!     "assets/icons",
//! );
//! let themes = ThemeStore::new("themes");
//! themes.ensure_builtin_themes().ok();
//!
//! let converter = Converter::new(glyphs, themes);
//! let html = converter
//!     .convert_document("# Hello\nworld", &ConvertOptions::default())
//!     .unwrap();
//! ```

pub mod core;
pub mod utils;

pub use crate::core::glyph::{load_mapping, parse_mapping, GlyphEngine, GlyphIndex, GlyphMapping};
pub use crate::core::pipeline::{ConvertOptions, Converter};
pub use crate::core::render::{ComrakRenderer, ExtensionSet, MarkupRenderer, KNOWN_EXTENSIONS};
pub use crate::core::repair::{RepairEngine, MAX_PASS_ITERATIONS};
pub use crate::core::tables::{max_header_columns, table_style, Orientation, TableHandling};
pub use crate::core::theme::{ThemeStore, DEFAULT_LIGHT_THEME, FALLBACK_STYLE, GITHUB_DARK_THEME};
pub use crate::utils::error::{ConvertError, ConvertResult, ConvertWarning};
pub use crate::utils::report::{ConversionReport, PassReport};

/// Convert Markdown to a rendered, repaired HTML body with glyph
/// substitution disabled.
///
/// Convenience for callers that only need repair and rendering; the full
/// surface, including styling and document assembly, is [`Converter`].
pub fn convert_markdown(markdown: &str, options: &ConvertOptions) -> ConvertResult<String> {
    let converter = Converter::new(
        GlyphEngine::disabled(),
        ThemeStore::new(std::path::PathBuf::new()),
    );
    converter.convert_body(markdown, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convenience_conversion_renders_body() {
        let html = convert_markdown("# Title\n\ntext", &ConvertOptions::default())
            .expect("converts");
        assert!(html.contains("Title</h1>"));
        assert!(html.contains("<p>text</p>"));
    }
}
