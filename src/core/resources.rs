//! Relative resource rewriting for rendered markup.
//!
//! The export step runs against a temporary document, so image references
//! relative to the source file must become absolute `file:///` URLs.
//! Absolute paths, URLs and data URIs pass through untouched.

use std::path::Path;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref IMG_SRC: Regex =
        Regex::new(r#"(<img[^>]*src=)(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref ABSOLUTE_REF: Regex =
        Regex::new(r"^(https?://|file://|data:|/|\\|[A-Za-z]:\\)").unwrap();
}

/// Rewrite relative `<img src>` references against `base_dir`.
pub fn rewrite_relative_sources(html: &str, base_dir: &Path) -> String {
    IMG_SRC
        .replace_all(html, |caps: &Captures<'_>| {
            let (quote, url) = match (caps.get(2), caps.get(3)) {
                (Some(double), _) => ('"', double.as_str()),
                (None, Some(single)) => ('\'', single.as_str()),
                (None, None) => return caps[0].to_string(),
            };
            if ABSOLUTE_REF.is_match(url) {
                return caps[0].to_string();
            }
            let absolute = normalize_path(&base_dir.join(url));
            format!("{}{}file:///{}{}", &caps[1], quote, absolute, quote)
        })
        .into_owned()
}

/// Join-and-normalize without touching the filesystem: collapse `.` and
/// `..` segments and use forward slashes throughout.
fn normalize_path(path: &Path) -> String {
    use std::path::Component;

    let mut parts: Vec<String> = Vec::new();
    let mut prefix = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => prefix = p.as_os_str().to_string_lossy().replace('\\', "/"),
            Component::RootDir => {}
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }

    let joined = parts.join("/");
    let rooted = if path.has_root() || !prefix.is_empty() {
        format!("{}/{}", prefix, joined)
    } else {
        joined
    };
    rooted.trim_start_matches('/').to_string()
}
