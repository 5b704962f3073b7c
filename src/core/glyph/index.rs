//! Longest-match glyph tokenizer built from a mapping resource.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;

/// Glyph string -> asset folder name, in mapping-file order.
///
/// An empty mapping is a valid state and disables substitution.
pub type GlyphMapping = IndexMap<String, String>;

/// Parse a mapping resource: a flat JSON object of glyph -> folder name.
///
/// Malformed content yields an empty mapping rather than an error; the
/// substitution feature is then silently disabled for the session.
pub fn parse_mapping(text: &str) -> GlyphMapping {
    match serde_json::from_str(text) {
        Ok(mapping) => mapping,
        Err(err) => {
            log::warn!("glyph mapping is malformed, substitution disabled: {}", err);
            GlyphMapping::new()
        }
    }
}

/// Load a mapping file from disk; a missing file behaves like a malformed one.
pub fn load_mapping(path: &Path) -> GlyphMapping {
    match fs::read_to_string(path) {
        Ok(text) => parse_mapping(&text),
        Err(err) => {
            log::warn!(
                "glyph mapping {} could not be read, substitution disabled: {}",
                path.display(),
                err
            );
            GlyphMapping::new()
        }
    }
}

/// Compiled longest-match matcher over the mapping keys.
///
/// Immutable once built. Alternatives are ordered by descending key length
/// (lexicographic tie-break) so that a glyph which is a textual prefix of
/// another is never matched before the longer one: the regex engine picks
/// the first alternative that matches at a position.
pub struct GlyphIndex {
    mapping: GlyphMapping,
    matcher: Option<Regex>,
}

impl GlyphIndex {
    pub fn new(mapping: GlyphMapping) -> Self {
        let matcher = compile_matcher(&mapping);
        GlyphIndex { mapping, matcher }
    }

    /// True when the mapping was empty (or unusable) and substitution is a
    /// pass-through.
    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }

    /// The asset folder registered for a glyph.
    pub fn folder_for(&self, glyph: &str) -> Option<&str> {
        self.mapping.get(glyph).map(String::as_str)
    }

    pub fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }
}

fn compile_matcher(mapping: &GlyphMapping) -> Option<Regex> {
    if mapping.is_empty() {
        return None;
    }

    let mut keys: Vec<&str> = mapping.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let pattern = keys
        .iter()
        .map(|key| regex::escape(key))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&pattern) {
        Ok(matcher) => Some(matcher),
        Err(err) => {
            log::warn!("glyph matcher failed to compile, substitution disabled: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> GlyphMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_mapping_has_no_matcher() {
        let index = GlyphIndex::new(GlyphMapping::new());
        assert!(index.is_empty());
        assert!(index.matcher().is_none());
    }

    #[test]
    fn test_longest_key_matches_first() {
        let index = GlyphIndex::new(mapping(&[
            ("\u{2b50}", "star"),
            ("\u{2b50}\u{1f527}", "star_wrench"),
        ]));
        let matcher = index.matcher().expect("matcher built");
        let text = "a \u{2b50}\u{1f527} b";
        let found = matcher.find(text).expect("match");
        assert_eq!(found.as_str(), "\u{2b50}\u{1f527}");
    }

    #[test]
    fn test_shorter_key_still_matches_alone() {
        let index = GlyphIndex::new(mapping(&[
            ("\u{2b50}", "star"),
            ("\u{2b50}\u{1f527}", "star_wrench"),
        ]));
        let matcher = index.matcher().expect("matcher built");
        let found = matcher.find("just \u{2b50} here").expect("match");
        assert_eq!(found.as_str(), "\u{2b50}");
        assert_eq!(index.folder_for("\u{2b50}"), Some("star"));
    }

    #[test]
    fn test_keys_with_regex_metacharacters_are_escaped() {
        let index = GlyphIndex::new(mapping(&[("(c)", "copyright")]));
        let matcher = index.matcher().expect("matcher built");
        assert!(matcher.is_match("note (c) 2024"));
        assert!(!matcher.is_match("note c 2024"));
    }

    #[test]
    fn test_malformed_mapping_parses_empty() {
        assert!(parse_mapping("not json at all").is_empty());
        assert!(parse_mapping("[1, 2, 3]").is_empty());
    }

    #[test]
    fn test_mapping_parse_keeps_order() {
        let mapping = parse_mapping(r#"{"b": "folder_b", "a": "folder_a"}"#);
        let keys: Vec<&String> = mapping.keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }
}
