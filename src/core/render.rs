//! Renderer collaborator seam and the comrak-backed default.
//!
//! The core never interprets Markdown itself; it forwards the text and the
//! caller's enabled extension subset to a [`MarkupRenderer`]. Extension
//! identifiers and their semantics belong to the renderer implementation.

use comrak::ComrakOptions;
use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::utils::error::ConvertResult;

/// Recognized extension names and their descriptions, for validation and
/// CLI listings.
pub static KNOWN_EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "tables" => "Pipe tables",
    "footnotes" => "Footnote references",
    "strikethrough" => "~~strikethrough~~ spans",
    "tasklists" => "Task list items",
    "autolinks" => "Bare URL autolinking",
    "superscript" => "Superscript spans",
    "description-lists" => "Description lists",
    "heading-ids" => "Heading anchors for TOC generation",
    "wikilinks" => "[[wiki]] style links",
    "smart-punctuation" => "Smart quotes and dashes",
    "hard-breaks" => "Render single newlines as hard breaks",
};

/// The fixed, independently togglable set of renderer extensions.
///
/// Defaults mirror the application's stock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExtensionSet {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub autolinks: bool,
    pub superscript: bool,
    pub description_lists: bool,
    pub heading_ids: bool,
    pub wikilinks: bool,
    pub smart_punctuation: bool,
    pub hard_breaks: bool,
}

impl Default for ExtensionSet {
    fn default() -> Self {
        ExtensionSet {
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
            autolinks: true,
            superscript: true,
            description_lists: true,
            heading_ids: true,
            wikilinks: false,
            smart_punctuation: true,
            hard_breaks: true,
        }
    }
}

impl ExtensionSet {
    /// Everything off; useful as a base for explicit `--extensions` lists.
    pub fn none() -> Self {
        ExtensionSet {
            tables: false,
            footnotes: false,
            strikethrough: false,
            tasklists: false,
            autolinks: false,
            superscript: false,
            description_lists: false,
            heading_ids: false,
            wikilinks: false,
            smart_punctuation: false,
            hard_breaks: false,
        }
    }

    /// Toggle one extension by its registered name. Returns false for
    /// unrecognized names; callers decide whether that is an error.
    pub fn set(&mut self, name: &str, enabled: bool) -> bool {
        match name {
            "tables" => self.tables = enabled,
            "footnotes" => self.footnotes = enabled,
            "strikethrough" => self.strikethrough = enabled,
            "tasklists" => self.tasklists = enabled,
            "autolinks" => self.autolinks = enabled,
            "superscript" => self.superscript = enabled,
            "description-lists" => self.description_lists = enabled,
            "heading-ids" => self.heading_ids = enabled,
            "wikilinks" => self.wikilinks = enabled,
            "smart-punctuation" => self.smart_punctuation = enabled,
            "hard-breaks" => self.hard_breaks = enabled,
            _ => return false,
        }
        true
    }

    pub fn is_known(name: &str) -> bool {
        KNOWN_EXTENSIONS.contains_key(name)
    }

    /// The enabled subset, as registered names.
    pub fn enabled_names(&self) -> Vec<&'static str> {
        let pairs = [
            ("tables", self.tables),
            ("footnotes", self.footnotes),
            ("strikethrough", self.strikethrough),
            ("tasklists", self.tasklists),
            ("autolinks", self.autolinks),
            ("superscript", self.superscript),
            ("description-lists", self.description_lists),
            ("heading-ids", self.heading_ids),
            ("wikilinks", self.wikilinks),
            ("smart-punctuation", self.smart_punctuation),
            ("hard-breaks", self.hard_breaks),
        ];
        pairs
            .into_iter()
            .filter(|(_, enabled)| *enabled)
            .map(|(name, _)| name)
            .collect()
    }
}

/// The renderer collaborator: Markdown text plus an enabled extension
/// subset in, rendered HTML out. Failures are opaque to the core and
/// surface as [`crate::utils::error::ConvertError::RenderError`].
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, markdown: &str, extensions: &ExtensionSet) -> ConvertResult<String>;
}

/// Default renderer backed by comrak.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakRenderer;

impl MarkupRenderer for ComrakRenderer {
    fn render(&self, markdown: &str, extensions: &ExtensionSet) -> ConvertResult<String> {
        let options = comrak_options(extensions);
        Ok(comrak::markdown_to_html(markdown, &options))
    }
}

fn comrak_options(extensions: &ExtensionSet) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = extensions.tables;
    options.extension.footnotes = extensions.footnotes;
    options.extension.strikethrough = extensions.strikethrough;
    options.extension.tasklist = extensions.tasklists;
    options.extension.autolink = extensions.autolinks;
    options.extension.superscript = extensions.superscript;
    options.extension.description_lists = extensions.description_lists;
    options.extension.header_ids = extensions.heading_ids.then(String::new);
    options.extension.wikilinks_title_after_pipe = extensions.wikilinks;
    options.parse.smart = extensions.smart_punctuation;
    options.render.hardbreaks = extensions.hard_breaks;
    // Substituted glyph spans are raw inline HTML and must survive
    // rendering untouched.
    options.render.unsafe_ = true;
    options
}
