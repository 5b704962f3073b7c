//! End-to-end conversion pipeline.
//!
//! The converter sequences glyph substitution, structural repair, the
//! renderer collaborator, relative-resource rewriting, table analysis and
//! final document assembly. It holds no state beyond the engines it
//! composes, so one instance can serve repeated and concurrent conversions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::glyph::GlyphEngine;
use crate::core::render::{ComrakRenderer, ExtensionSet, MarkupRenderer};
use crate::core::repair::RepairEngine;
use crate::core::resources::rewrite_relative_sources;
use crate::core::tables::{max_header_columns, table_style, Orientation, TableHandling};
use crate::core::theme::{ThemeStore, DEFAULT_LIGHT_THEME};
use crate::utils::error::ConvertResult;
use crate::utils::report::{ConversionReport, PassReport};

/// Per-conversion settings consumed by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Run the structural repair passes before rendering
    pub repair: bool,
    pub table_handling: TableHandling,
    pub orientation: Orientation,
    /// Theme identity; compared by exact name, content is opaque
    pub theme: String,
    pub extensions: ExtensionSet,
    /// Base directory of the source document, for relative image rewriting
    pub base_dir: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            repair: true,
            table_handling: TableHandling::default(),
            orientation: Orientation::default(),
            theme: DEFAULT_LIGHT_THEME.to_string(),
            extensions: ExtensionSet::default(),
            base_dir: None,
        }
    }
}

/// Composes the engines into one conversion pipeline.
pub struct Converter {
    glyphs: GlyphEngine,
    repair: RepairEngine,
    renderer: Box<dyn MarkupRenderer>,
    themes: ThemeStore,
}

impl Converter {
    /// A converter using the comrak-backed default renderer.
    pub fn new(glyphs: GlyphEngine, themes: ThemeStore) -> Self {
        Converter {
            glyphs,
            repair: RepairEngine::new(),
            renderer: Box::new(ComrakRenderer),
            themes,
        }
    }

    /// Swap in a different renderer collaborator.
    pub fn with_renderer(mut self, renderer: Box<dyn MarkupRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn themes(&self) -> &ThemeStore {
        &self.themes
    }

    pub fn glyphs(&self) -> &GlyphEngine {
        &self.glyphs
    }

    /// Produce the styled HTML body: substitution, repair, render and
    /// resource rewriting, without the document shell.
    pub fn convert_body(&self, markdown: &str, options: &ConvertOptions) -> ConvertResult<String> {
        self.body_with_passes(markdown, options).map(|(body, _)| body)
    }

    /// Produce the complete styled document.
    pub fn convert_document(
        &self,
        markdown: &str,
        options: &ConvertOptions,
    ) -> ConvertResult<String> {
        self.convert_document_with_report(markdown, options)
            .map(|(document, _)| document)
    }

    /// Produce the complete styled document plus the conversion report.
    pub fn convert_document_with_report(
        &self,
        markdown: &str,
        options: &ConvertOptions,
    ) -> ConvertResult<(String, ConversionReport)> {
        let (body, repair_passes) = self.body_with_passes(markdown, options)?;

        let column_count = max_header_columns(&body);
        let table_css = table_style(
            column_count,
            options.table_handling,
            options.orientation,
            &options.theme,
        );
        let theme_css = self.themes.load(&options.theme);
        let document = assemble_document(&theme_css, &table_css, &body);

        let report = ConversionReport {
            unresolved_glyphs: self.glyphs.unresolved_glyphs(),
            repair_passes,
            column_count,
        };
        Ok((document, report))
    }

    fn body_with_passes(
        &self,
        markdown: &str,
        options: &ConvertOptions,
    ) -> ConvertResult<(String, Vec<PassReport>)> {
        let substituted = self.glyphs.substitute(markdown);

        let (repaired, passes) = if options.repair {
            self.repair.repair_with_report(&substituted)
        } else {
            (substituted, Vec::new())
        };

        let rendered = self.renderer.render(&repaired, &options.extensions)?;

        let body = match &options.base_dir {
            Some(dir) => rewrite_relative_sources(&rendered, dir),
            None => rendered,
        };
        Ok((body, passes))
    }
}

/// Theme CSS first so the generated table rules can override it, then the
/// rendered body.
fn assemble_document(theme_css: &str, table_css: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n{}\n{}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        theme_css, table_css, body
    )
}
