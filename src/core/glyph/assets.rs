//! Asset tree resolution for glyph artwork.
//!
//! Each mapped glyph names a folder in the asset tree. Inside that folder
//! the resolver looks for the flat rendering style only; gradient ("color")
//! variants render incorrectly in the export pipeline and are never picked.

use std::fs;
use std::path::{Path, PathBuf};

use super::svg::sanitize_svg;

/// Directory name marking the flat rendering style (case-insensitive).
const FLAT_STYLE_DIR: &str = "flat";
/// Directory name marking the preferred variant set (case-insensitive).
const DEFAULT_VARIANT_DIR: &str = "default";

/// Locates and sanitizes the vector fragment for an asset folder.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AssetResolver { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a folder name to sanitized SVG text.
    ///
    /// Not-found and read-failure are indistinguishable: both return `None`
    /// and the caller falls back to emitting the glyph unchanged.
    pub fn resolve(&self, folder_name: &str) -> Option<String> {
        let base = self.root.join(folder_name);
        let flat_dir = find_flat_dir(&base)?;
        let svg_path = first_svg_in(&flat_dir)?;
        match fs::read_to_string(&svg_path) {
            Ok(raw) => Some(sanitize_svg(&raw)),
            Err(err) => {
                log::debug!("asset {} unreadable: {}", svg_path.display(), err);
                None
            }
        }
    }
}

/// Find the flat-style directory under `base`.
///
/// Traversal is depth-first with children visited in file-name order, so
/// the result is stable across platforms. A flat directory whose immediate
/// parent is the default variant set wins immediately; otherwise the first
/// flat directory in traversal order is used.
fn find_flat_dir(base: &Path) -> Option<PathBuf> {
    let mut fallback: Option<PathBuf> = None;
    let mut stack = vec![base.to_path_buf()];

    while let Some(dir) = stack.pop() {
        if !dir.is_dir() {
            continue;
        }

        if dir_name_matches(&dir, FLAT_STYLE_DIR) {
            let under_default = dir
                .parent()
                .map(|parent| dir_name_matches(parent, DEFAULT_VARIANT_DIR))
                .unwrap_or(false);
            if under_default {
                return Some(dir);
            }
            if fallback.is_none() {
                fallback = Some(dir.clone());
            }
        }

        // Push in reverse so the stack pops children in name order.
        for child in sorted_children(&dir).into_iter().rev() {
            stack.push(child);
        }
    }

    fallback
}

fn sorted_children(dir: &Path) -> Vec<PathBuf> {
    let mut children: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect(),
        Err(_) => Vec::new(),
    };
    children.sort();
    children
}

fn dir_name_matches(dir: &Path, keyword: &str) -> bool {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(keyword))
        .unwrap_or(false)
}

/// The lexicographically first `*.svg` file in a directory.
fn first_svg_in(dir: &Path) -> Option<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("svg"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    files.into_iter().next()
}
