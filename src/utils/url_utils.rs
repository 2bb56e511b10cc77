//! Link resolution and origin checks.

use crate::document::DocumentError;
use url::Url;

/// Resolve a raw `href` attribute the way a browser's `element.href` does.
///
/// Absolute URLs are returned normalized. Relative ones are joined onto `base`;
/// without a base they are returned unchanged.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidHref`] when the href cannot be joined onto the base.
pub fn resolve_href(base: Option<&Url>, raw: &str) -> Result<String, DocumentError> {
    let raw = raw.trim();
    if let Ok(absolute) = Url::parse(raw) {
        return Ok(absolute.to_string());
    }

    match base {
        Some(base) => base
            .join(raw)
            .map(|url| url.to_string())
            .map_err(|e| DocumentError::InvalidHref {
                href: raw.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(raw.to_string()),
    }
}

/// Resolved `href` of an anchor-like node, `None` when the attribute is missing or blank.
///
/// # Errors
///
/// Propagates [`resolve_href`] failures.
pub fn link_href(base: Option<&Url>, raw: Option<&str>) -> Result<Option<String>, DocumentError> {
    match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => resolve_href(base, raw).map(Some),
        _ => Ok(None),
    }
}

/// Whether a resolved href points at the same origin as the document.
///
/// Without a document location, relative hrefs count as same-origin and
/// absolute ones as cross-origin.
#[must_use]
pub fn is_same_origin(base: Option<&Url>, href: &str) -> bool {
    match (base, Url::parse(href)) {
        (Some(base), Ok(target)) => base.origin() == target.origin(),
        (None, Ok(_)) => false,
        (_, Err(_)) => true,
    }
}
