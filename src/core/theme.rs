//! Theme stylesheet loading.
//!
//! Theme content is opaque text to this core: it is concatenated ahead of
//! the generated table styles and never parsed. Failure to load a theme
//! degrades to a visibly-broken fallback block so the problem is obvious in
//! the output without aborting the conversion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the built-in light theme; the only theme identity the table
/// styling compares against.
pub const DEFAULT_LIGHT_THEME: &str = "default_light.css";
/// Name of the built-in dark theme.
pub const GITHUB_DARK_THEME: &str = "github_dark.css";

/// Substituted when a theme cannot be read.
pub const FALLBACK_STYLE: &str =
    "body { color: red; font-family: sans-serif; } /* THEME FAILED TO LOAD */";

const DEFAULT_LIGHT_CSS: &str = include_str!("../../assets/themes/default_light.css");
const GITHUB_DARK_CSS: &str = include_str!("../../assets/themes/github_dark.css");

/// Loads theme CSS by name from a themes directory.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    dir: PathBuf,
}

impl ThemeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ThemeStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the themes directory and write the built-in themes into it,
    /// without overwriting files the user has edited.
    pub fn ensure_builtin_themes(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        for (name, content) in [
            (DEFAULT_LIGHT_THEME, DEFAULT_LIGHT_CSS),
            (GITHUB_DARK_THEME, GITHUB_DARK_CSS),
        ] {
            let path = self.dir.join(name);
            if !path.exists() {
                fs::write(&path, content.trim())?;
            }
        }
        Ok(())
    }

    /// Theme names available on disk, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| entry.file_name().into_string().ok())
                .filter(|name| name.ends_with(".css"))
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Load a theme's CSS text, falling back to the broken-style block on
    /// any failure.
    pub fn load(&self, name: &str) -> String {
        let path = self.dir.join(name);
        match fs::read_to_string(&path) {
            Ok(css) => css,
            Err(err) => {
                log::warn!("theme {} failed to load: {}", path.display(), err);
                FALLBACK_STYLE.to_string()
            }
        }
    }
}
