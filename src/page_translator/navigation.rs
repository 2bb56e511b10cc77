//! Brand, navigation links and calls-to-action.

use crate::config::ReadableConfig;
use crate::document::{DocumentError, DocumentModel};
use crate::page_translator::text_normalizer::clean_text;
use crate::utils::link_href;
use std::collections::HashSet;

/// Brand selectors, most specific first.
const BRAND_SELECTORS: &[&str] = &[
    "h1",
    ".logo",
    ".brand",
    ".site-title",
    "[class*=logo]",
    "[class*=brand]",
    "header h1",
    "nav h1",
    ".navbar-brand",
    ".site-logo",
    ".company-name",
    ".brand-name",
];

const NAV_LINK_SELECTOR: &str = "nav a, header a, .nav a, .menu a, .navigation a";

/// Lowercase link text fragments that mark housekeeping links.
const SKIPPED_LINK_PATTERNS: &[&str] = &["cookie", "privacy", "terms", "login", "sign up", "cart"];

const CTA_SELECTORS: &[&str] = &[
    "button",
    ".btn",
    ".cta",
    "[role=button]",
    ".button",
    ".call-to-action",
    ".primary-button",
];

const CTA_KEYWORDS: &[&str] = &[
    "start",
    "get",
    "try",
    "sign up",
    "download",
    "learn more",
    "contact",
    "build",
    "create",
    "join",
    "register",
    "subscribe",
    "book",
    "schedule",
    "buy",
    "purchase",
    "order",
    "shop",
    "explore",
    "discover",
    "find out",
    "request",
    "apply",
    "submit",
    "send",
    "call",
    "email",
    "demo",
];

/// The navigation block rendered at the top of the readable view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationData {
    pub brand: Option<String>,
    pub links: Vec<String>,
    pub ctas: Vec<String>,
}

/// Page brand name, upper-cased.
///
/// Walks [`BRAND_SELECTORS`] and takes the first element with text. Falls back
/// to the part of the document title before the first `|` or `-`.
pub fn brand_name<D: DocumentModel>(doc: &D) -> Result<Option<String>, DocumentError> {
    for selector in BRAND_SELECTORS {
        if let Some(node) = doc.query_first(selector)? {
            let text = doc.text_content(node);
            if !text.trim().is_empty() {
                return Ok(non_empty(clean_text(&text).to_uppercase()));
            }
        }
    }

    let title = doc.title();
    let leading = title.split(['|', '-']).next().unwrap_or_default();
    Ok(non_empty(clean_text(leading).to_uppercase()))
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn is_skipped_link(text: &str) -> bool {
    let lower = text.to_lowercase();
    SKIPPED_LINK_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

/// Whether the lowercase text carries call-to-action vocabulary.
#[must_use]
pub fn is_cta_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    CTA_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Header and menu links as `[text](href)`, in document order.
pub fn navigation_links<D: DocumentModel>(
    doc: &D,
    limit: usize,
) -> Result<Vec<String>, DocumentError> {
    let mut links = Vec::new();

    for anchor in doc.query_all(NAV_LINK_SELECTOR)? {
        if links.len() >= limit {
            break;
        }
        let text = doc.text_content(anchor);
        if text.trim().is_empty() || is_skipped_link(&text) {
            continue;
        }

        match link_href(doc.base_url(), doc.attr(anchor, "href")) {
            Ok(Some(href)) => links.push(format!("[{}]({href})", clean_text(&text))),
            Ok(None) => {}
            Err(e) => tracing::debug!("Skipping navigation link: {}", e),
        }
    }

    Ok(links)
}

/// Primary calls-to-action wrapped in `cta-highlight` spans.
///
/// Selectors are tried in order, elements within each in document order. An
/// element matched by several selectors counts once.
pub fn primary_ctas<D: DocumentModel>(
    doc: &D,
    limit: usize,
) -> Result<Vec<String>, DocumentError> {
    let mut seen: HashSet<D::Node> = HashSet::new();
    let mut ctas = Vec::new();

    for selector in CTA_SELECTORS {
        for element in doc.query_all(selector)? {
            if ctas.len() >= limit {
                return Ok(ctas);
            }
            if seen.contains(&element) {
                continue;
            }

            let text = doc.text_content(element);
            if text.trim().is_empty() || !is_cta_text(&text) {
                continue;
            }
            seen.insert(element);

            let label = clean_text(&text);
            let href = match link_href(doc.base_url(), doc.attr(element, "href")) {
                Ok(href) => href,
                Err(e) => {
                    tracing::debug!("CTA href ignored: {}", e);
                    None
                }
            };
            ctas.push(match href {
                Some(href) => format!(r#"<span class="cta-highlight">[{label}]({href})</span>"#),
                None => format!(r#"<span class="cta-highlight">[{label}]</span>"#),
            });
        }
    }

    Ok(ctas)
}

/// Brand, links and CTAs. A failing part is logged and left empty.
pub fn extract_navigation<D: DocumentModel>(doc: &D, config: &ReadableConfig) -> NavigationData {
    let brand = brand_name(doc).unwrap_or_else(|e| {
        tracing::warn!("Brand lookup failed: {}", e);
        None
    });
    let links = navigation_links(doc, config.max_nav_links()).unwrap_or_else(|e| {
        tracing::warn!("Navigation link extraction failed: {}", e);
        Vec::new()
    });
    let ctas = primary_ctas(doc, config.max_ctas()).unwrap_or_else(|e| {
        tracing::warn!("CTA extraction failed: {}", e);
        Vec::new()
    });

    NavigationData { brand, links, ctas }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use url::Url;

    fn doc(html: &str) -> HtmlDocument {
        HtmlDocument::parse(html, Some(Url::parse("https://acme.io/").expect("valid url")))
    }

    #[test]
    fn test_brand_from_logo() {
        let page = doc(r#"<header><a class="site-logo-link"><span class="logo">Acme Labs™</span></a></header>"#);
        assert_eq!(brand_name(&page).expect("valid selectors").as_deref(), Some("ACME LABS"));
    }

    #[test]
    fn test_brand_falls_back_to_title() {
        let page = doc("<html><head><title>Widgets | Acme</title></head><body><p>x</p></body></html>");
        assert_eq!(brand_name(&page).expect("valid selectors").as_deref(), Some("WIDGETS"));

        let dashed = doc("<html><head><title>Acme - Home</title></head><body></body></html>");
        assert_eq!(brand_name(&dashed).expect("valid selectors").as_deref(), Some("ACME"));

        let untitled = doc("<html><body></body></html>");
        assert_eq!(brand_name(&untitled).expect("valid selectors"), None);
    }

    #[test]
    fn test_navigation_links_skip_housekeeping_and_cap() {
        let mut html = String::from(r#"<nav><a href="/privacy">Privacy Policy</a><a href="/login">Login</a><a>No href</a>"#);
        for i in 0..12 {
            html.push_str(&format!(r#"<a href="/p{i}">Page {i}</a>"#));
        }
        html.push_str("</nav>");

        let links = navigation_links(&doc(&html), 10).expect("valid selector");
        assert_eq!(links.len(), 10);
        assert_eq!(links[0], "[Page 0](https://acme.io/p0)");
        assert!(links.iter().all(|l| !l.contains("Privacy") && !l.contains("Login")));
    }

    #[test]
    fn test_ctas_counted_once_and_capped() {
        let page = doc(
            r#"<button class="btn cta">Get started</button>
               <a class="button" href="/demo">Book a demo</a>
               <button>Menu</button>
               <a class="btn" href="/trial">Try it free</a>
               <a class="cta" href="/contact">Contact sales</a>"#,
        );
        let ctas = primary_ctas(&page, 3).expect("valid selectors");
        assert_eq!(
            ctas,
            vec![
                r#"<span class="cta-highlight">[Get started]</span>"#.to_string(),
                r#"<span class="cta-highlight">[Try it free](https://acme.io/trial)</span>"#.to_string(),
                r#"<span class="cta-highlight">[Contact sales](https://acme.io/contact)</span>"#.to_string(),
            ]
        );
    }
}
