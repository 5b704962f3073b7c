//! Inline glyph substitution.
//!
//! Replaces pictographic glyphs with self-contained vector fragments
//! resolved from the asset tree. Non-glyph content is preserved
//! byte-for-byte; a glyph without a usable asset passes through unchanged.

pub mod assets;
pub mod cache;
pub mod index;
pub mod svg;

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub use assets::AssetResolver;
pub use cache::{Resolved, SubstitutionCache};
pub use index::{load_mapping, parse_mapping, GlyphIndex, GlyphMapping};
pub use svg::{sanitize_svg, FRAGMENT_SIZE};

/// Applies the glyph index and asset resolver across input text.
///
/// The index is immutable once built; reloading a mapping means building a
/// new engine. The cache lives and dies with the engine and is never
/// persisted.
pub struct GlyphEngine {
    index: GlyphIndex,
    resolver: AssetResolver,
    cache: SubstitutionCache,
}

impl GlyphEngine {
    pub fn new(mapping: GlyphMapping, asset_root: impl Into<PathBuf>) -> Self {
        GlyphEngine {
            index: GlyphIndex::new(mapping),
            resolver: AssetResolver::new(asset_root),
            cache: SubstitutionCache::new(),
        }
    }

    /// An engine with an empty mapping: substitution is a pass-through.
    pub fn disabled() -> Self {
        GlyphEngine::new(GlyphMapping::new(), PathBuf::new())
    }

    pub fn is_enabled(&self) -> bool {
        !self.index.is_empty()
    }

    /// Replace every matched glyph with an embeddable fragment.
    ///
    /// Disk reads happen on cache miss only; repeated occurrences of the
    /// same glyph (resolved or not) cost a cache lookup each.
    pub fn substitute(&self, text: &str) -> String {
        let Some(matcher) = self.index.matcher() else {
            return text.to_string();
        };

        matcher
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let glyph = &caps[0];
                match self.cache.get_or_resolve(glyph, || self.resolve(glyph)) {
                    Resolved::Fragment(svg) => embed_fragment(&svg),
                    Resolved::Unresolved => glyph.to_string(),
                }
            })
            .into_owned()
    }

    /// Glyphs that matched but had no usable asset, for reporting.
    pub fn unresolved_glyphs(&self) -> Vec<String> {
        self.cache.unresolved()
    }

    fn resolve(&self, glyph: &str) -> Resolved {
        let Some(folder) = self.index.folder_for(glyph) else {
            return Resolved::Unresolved;
        };
        match self.resolver.resolve(folder) {
            Some(svg) => Resolved::Fragment(svg),
            None => {
                log::debug!("glyph {:?} has no usable asset under {:?}", glyph, folder);
                Resolved::Unresolved
            }
        }
    }
}

/// Emit a fragment as a block-level placeholder sized in text-relative
/// units, with the encoded fragment as its background image.
fn embed_fragment(svg: &str) -> String {
    let encoded = BASE64.encode(svg.as_bytes());
    format!(
        "<span style=\"display:inline-block;width:1.2em;height:1.2em;margin:0 0.1em;\
background:url(data:image/svg+xml;base64,{}) no-repeat center center;\
background-size:contain;vertical-align:-0.3em;\"></span>",
        encoded
    )
}
