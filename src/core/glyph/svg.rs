//! SVG fragment sanitization for inline embedding.
//!
//! The downstream rasterizer mishandles clip paths and renders
//! inconsistently when fragments carry their source-declared size, so every
//! fragment is normalized before it is encoded.

use lazy_static::lazy_static;
use regex::Regex;

/// Logical edge length injected into every fragment.
pub const FRAGMENT_SIZE: u32 = 128;

lazy_static! {
    static ref CONTROL_WS: Regex = Regex::new(r"[\r\n\t]").unwrap();
    static ref SPACE_RUN: Regex = Regex::new(r"\s{2,}").unwrap();
    static ref XML_PROLOGUE: Regex = Regex::new(r"<\?xml.*?\?>").unwrap();
    static ref CLIP_DEFS: Regex =
        Regex::new(r"(?s)<defs>\s*<clipPath[^>]*>.*?</clipPath>\s*</defs>").unwrap();
    static ref CLIP_ATTR: Regex = Regex::new(r#"\sclip-path="url\(#.*?\)""#).unwrap();
    static ref WIDTH_ATTR: Regex = Regex::new(r#"\s+width="[^"]+""#).unwrap();
    static ref HEIGHT_ATTR: Regex = Regex::new(r#"\s+height="[^"]+""#).unwrap();
    static ref SVG_OPEN: Regex = Regex::new(r"<svg").unwrap();
}

/// Normalize raw SVG text into an embeddable fragment.
///
/// Steps, in order: collapse whitespace runs, strip the XML prologue,
/// inject the namespace declaration if absent, remove clip-path
/// definitions and references, replace any declared size with the fixed
/// high-resolution square.
pub fn sanitize_svg(raw: &str) -> String {
    let collapsed = CONTROL_WS.replace_all(raw, " ");
    let collapsed = SPACE_RUN.replace_all(&collapsed, " ");
    let mut svg = collapsed.trim().to_string();

    svg = XML_PROLOGUE.replace(&svg, "").trim().to_string();

    if !svg.contains("xmlns=") {
        svg = SVG_OPEN
            .replace(&svg, r#"<svg xmlns="http://www.w3.org/2000/svg""#)
            .into_owned();
    }

    svg = CLIP_DEFS.replace_all(&svg, "").into_owned();
    svg = CLIP_ATTR.replace_all(&svg, "").into_owned();

    svg = WIDTH_ATTR.replace(&svg, "").into_owned();
    svg = HEIGHT_ATTR.replace(&svg, "").into_owned();
    svg = SVG_OPEN
        .replace(
            &svg,
            format!(r#"<svg width="{}" height="{}""#, FRAGMENT_SIZE, FRAGMENT_SIZE),
        )
        .into_owned();

    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapsed() {
        let out = sanitize_svg("<svg>\n\t<path\r\n   d=\"M0 0\"/>\n</svg>");
        assert!(!out.contains('\n'));
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_prologue_stripped() {
        let out = sanitize_svg("<?xml version=\"1.0\" encoding=\"UTF-8\"?><svg><path/></svg>");
        assert!(!out.contains("<?xml"));
        assert!(out.starts_with("<svg"));
    }

    #[test]
    fn test_namespace_injected_when_absent() {
        let out = sanitize_svg("<svg><path/></svg>");
        assert!(out.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    }

    #[test]
    fn test_existing_namespace_kept() {
        let out = sanitize_svg(r#"<svg xmlns="http://www.w3.org/2000/svg"><path/></svg>"#);
        assert_eq!(out.matches("xmlns=").count(), 1);
    }

    #[test]
    fn test_clip_paths_removed() {
        let raw = r##"<svg><defs><clipPath id="c"><rect/></clipPath></defs><g clip-path="url(#c)"><path/></g></svg>"##;
        let out = sanitize_svg(raw);
        assert!(!out.contains("clipPath"));
        assert!(!out.contains("clip-path"));
    }

    #[test]
    fn test_size_replaced_with_fixed_square() {
        let out = sanitize_svg(r#"<svg width="24" height="24" viewBox="0 0 24 24"><path/></svg>"#);
        assert!(out.contains(r#"width="128""#));
        assert!(out.contains(r#"height="128""#));
        assert!(!out.contains(r#"width="24""#));
        assert!(out.contains(r#"viewBox="0 0 24 24""#));
    }

    #[test]
    fn test_size_injected_when_absent() {
        let out = sanitize_svg("<svg viewBox=\"0 0 24 24\"><path/></svg>");
        assert!(out.contains(r#"<svg width="128" height="128""#));
    }
}
