//! URL handling module for Wordtide
//!
//! This module provides full-match pattern sets (for ignored URLs and ignored words) and
//! link resolution for hrefs found on crawled pages.

mod matcher;

pub use matcher::{compile_full_match, PatternSet};

use url::Url;

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links (same page anchors)
/// - Invalid URLs
/// - Schemes other than http, https and file after resolution
///
/// The fragment of an accepted link is removed, so `/a#top` and `/a` are the same page.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wordtide::url::resolve_link;
///
/// let base = Url::parse("https://example.com/docs/index.html").unwrap();
/// assert_eq!(
///     resolve_link("intro.html#setup", &base),
///     Some("https://example.com/docs/intro.html".to_string())
/// );
/// assert_eq!(resolve_link("mailto:me@example.com", &base), None);
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" | "file" => {
            absolute_url.set_fragment(None);
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}
