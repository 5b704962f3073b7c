//! Core conversion pipeline
//!
//! This module contains the content transformation engines:
//! - Glyph substitution (index, asset resolution, cache)
//! - Structural Markdown repair
//! - Table analysis and styling
//! - Renderer collaborator seam, themes, and the orchestrator

pub mod glyph;
pub mod pipeline;
pub mod render;
pub mod repair;
pub mod resources;
pub mod tables;
pub mod theme;

pub use glyph::{GlyphEngine, GlyphIndex, GlyphMapping};
pub use pipeline::{ConvertOptions, Converter};
pub use render::{ComrakRenderer, ExtensionSet, MarkupRenderer};
pub use repair::RepairEngine;
pub use tables::{Orientation, TableHandling};
pub use theme::ThemeStore;
