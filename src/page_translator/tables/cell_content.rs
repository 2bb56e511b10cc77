//! Table cell flattening: icons, links, then remaining text.

use crate::document::{DocumentError, DocumentModel};
use crate::page_translator::text_normalizer::clean_text;
use crate::utils::link_href;

/// Icon hint fragments and the glyph each one stands for, checked in order.
const ICON_GLYPHS: &[(&[&str], &str)] = &[
    (&["check", "tick"], "✓"),
    (&["star", "favorite"], "★"),
    (&["arrow", "chevron"], "→"),
    (&["plus", "add"], "+"),
    (&["minus", "remove"], "-"),
    (&["fire", "flame"], "🔥"),
];

const GENERIC_ICON_GLYPH: &str = "•";

/// Glyph for an icon, chosen from hints in its markup (class names, ids, titles).
#[must_use]
pub fn icon_glyph(icon_markup: &str) -> &'static str {
    let lower = icon_markup.to_lowercase();
    ICON_GLYPHS
        .iter()
        .find(|(hints, _)| hints.iter().any(|hint| lower.contains(hint)))
        .map_or(GENERIC_ICON_GLYPH, |(_, glyph)| glyph)
}

/// Flatten a table cell into a single cleaned string.
///
/// Order: one glyph per contained `<svg>`, each link as `[text](href)`, then
/// the cell's text with those link texts removed. The whole result goes
/// through [`clean_text`], so only glyphs inside the allowed character set
/// (`+`, `-`) survive.
///
/// # Errors
///
/// Returns an error if the icon or link query fails for this cell.
pub fn extract_cell_content<D: DocumentModel>(
    doc: &D,
    cell: D::Node,
) -> Result<String, DocumentError> {
    let mut parts: Vec<String> = Vec::new();

    for icon in doc.query_all_within(cell, "svg")? {
        parts.push(icon_glyph(&doc.outer_html(icon)).to_string());
    }

    let mut remaining = doc.text_content(cell);
    for link in doc.query_all_within(cell, "a")? {
        let link_text = doc.text_content(link);
        let label = clean_text(&link_text);
        if label.is_empty() {
            continue;
        }

        match link_href(doc.base_url(), doc.attr(link, "href")) {
            Ok(Some(href)) => parts.push(format!("[{label}]({href})")),
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!("Keeping link text as plain cell text: {}", e);
                continue;
            }
        }
        remaining = remaining.replace(link_text.as_str(), " ");
    }
    parts.push(remaining);

    Ok(clean_text(&parts.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    fn cell(html: &str) -> String {
        let doc = HtmlDocument::parse(html, None);
        let td = doc
            .query_first("td")
            .expect("valid selector")
            .expect("cell present");
        extract_cell_content(&doc, td).expect("extracts")
    }

    #[test]
    fn test_icon_glyph_mapping() {
        assert_eq!(icon_glyph(r#"<svg class="icon-check"></svg>"#), "✓");
        assert_eq!(icon_glyph(r#"<svg data-icon="Chevron-Right"></svg>"#), "→");
        assert_eq!(icon_glyph(r#"<svg class="icon-plus"></svg>"#), "+");
        assert_eq!(icon_glyph("<svg></svg>"), "•");
    }

    #[test]
    fn test_plain_text_cell() {
        let html = "<table><tr><td>  Unlimited \n seats </td></tr></table>";
        assert_eq!(cell(html), "Unlimited seats");
    }

    #[test]
    fn test_link_text_is_not_duplicated() {
        let html = r#"<table><tr><td>See <a href="/docs">docs</a></td></tr></table>"#;
        assert_eq!(cell(html), "[docs](/docs) See");
    }

    #[test]
    fn test_icons_pass_through_clean_text() {
        let html = r#"<table><tr><td><svg class="plus"></svg> Extra</td></tr></table>"#;
        assert_eq!(cell(html), "+ Extra");

        let check = r#"<table><tr><td><svg class="check"></svg></td></tr></table>"#;
        assert_eq!(cell(check), "");
    }
}
