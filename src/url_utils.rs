//! URL helpers for image sources.

use url::Url;

/// Parse an absolute http(s) URL usable as a resolution base.
///
/// Returns `None` for relative strings, other schemes, or host-less URLs.
#[must_use]
pub fn parse_base(s: &str) -> Option<Url> {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }

    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Resolve an image `src` against an optional base.
///
/// Absolute URLs and `data:`/`blob:` sources are returned unchanged, as is
/// anything that fails to resolve. Without a base, relative values are kept
/// verbatim.
#[must_use]
pub fn resolve_src(src: &str, base: Option<&Url>) -> String {
    let src = src.trim();

    if src.is_empty() || src.starts_with("data:") || src.starts_with("blob:") {
        return src.to_string();
    }

    if parse_base(src).is_some() {
        return src.to_string();
    }

    match base {
        Some(base) => base.join(src).map_or_else(|_| src.to_string(), |u| u.to_string()),
        None => src.to_string(),
    }
}
