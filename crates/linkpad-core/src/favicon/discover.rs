//! Icon-link discovery in fetched HTML.
//!
//! Pure function over raw markup: no network access, and malformed or
//! partial documents never fail the caller.

use scraper::{Html, Selector};
use url::Url;

/// Relation keywords in priority order. Matching is case-insensitive
/// substring containment over the raw `rel` attribute value, so `icon`
/// also matches inside `apple-touch-icon`; first match in priority order
/// wins and that is intentional, observable behavior.
pub const REL_PRIORITY: [&str; 4] = [
    "icon",
    "shortcut icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
];

/// Candidate icon URL extracted from a page's link metadata. Lives only
/// for the duration of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLinkHint {
    /// Absolute URL of the candidate icon.
    pub url: Url,
    /// Relation keyword that selected this link.
    pub rel: &'static str,
}

/// Scans all `<link>` elements for the highest-priority relation keyword,
/// takes the first element with a matching `rel` and a non-empty `href`,
/// and resolves that `href` against `base` (the final post-redirect page
/// URL). Returns `None` when nothing matches for any keyword.
pub fn find_icon_link(html: &str, base: &Url) -> Option<IconLinkHint> {
    let document = Html::parse_document(html);
    let links = Selector::parse("link").ok()?;

    for rel in REL_PRIORITY {
        for element in document.select(&links) {
            let Some(rel_value) = element.value().attr("rel") else {
                continue;
            };
            if !rel_value.to_ascii_lowercase().contains(rel) {
                continue;
            }
            let Some(href) = element.value().attr("href").filter(|h| !h.is_empty()) else {
                continue;
            };
            if let Ok(resolved) = base.join(href) {
                return Some(IconLinkHint { url: resolved, rel });
            }
        }
    }

    None
}
