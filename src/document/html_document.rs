//! `scraper`-backed [`DocumentModel`] implementation.

use super::style::{inline_declaration, parse_px, style_hides};
use super::{BoxSize, DocumentError, DocumentModel};
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid")
});

/// Elements that never produce a rendered box.
const NON_RENDERED_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

/// A parsed HTML page together with the location it was loaded from.
pub struct HtmlDocument {
    html: Html,
    /// Pre-order position of every tree node, for document-order comparison.
    order: HashMap<NodeId, usize>,
    base_url: Option<Url>,
}

impl HtmlDocument {
    /// Parse a full HTML document.
    #[must_use]
    pub fn parse(source: &str, base_url: Option<Url>) -> Self {
        let html = Html::parse_document(source);
        let order = html
            .tree
            .root()
            .descendants()
            .enumerate()
            .map(|(position, node)| (node.id(), position))
            .collect();

        Self {
            html,
            order,
            base_url,
        }
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    fn require_element(&self, id: NodeId) -> Result<ElementRef<'_>, DocumentError> {
        self.element(id)
            .ok_or_else(|| DocumentError::DetachedNode(format!("{id:?}")))
    }

    fn selector(selector: &str) -> Result<Selector, DocumentError> {
        Selector::parse(selector).map_err(|e| DocumentError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    fn hides_itself(&self, element: ElementRef<'_>) -> bool {
        let value = element.value();
        NON_RENDERED_TAGS.contains(&value.name())
            || value.attr("hidden").is_some()
            || value.attr("style").is_some_and(style_hides)
    }
}

impl DocumentModel for HtmlDocument {
    type Node = NodeId;

    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DocumentError> {
        let selector = Self::selector(selector)?;
        Ok(self.html.select(&selector).map(|el| el.id()).collect())
    }

    fn query_all_within(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DocumentError> {
        let selector = Self::selector(selector)?;
        let scope = self.require_element(scope)?;
        Ok(scope.select(&selector).map(|el| el.id()).collect())
    }

    fn matches(&self, node: NodeId, selector: &str) -> Result<bool, DocumentError> {
        let selector = Self::selector(selector)?;
        let element = self.require_element(node)?;
        Ok(selector.matches(&element))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.html
            .tree
            .get(node)?
            .parent()
            .and_then(ElementRef::wrap)
            .map(|el| el.id())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(node)
            .map(|n| n.children().filter_map(ElementRef::wrap).map(|el| el.id()).collect())
            .unwrap_or_default()
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(node)
            .map(|n| {
                n.descendants()
                    .skip(1)
                    .filter_map(ElementRef::wrap)
                    .map(|el| el.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.html
            .tree
            .get(node)?
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|el| el.id())
    }

    fn compare_document_order(&self, a: NodeId, b: NodeId) -> Ordering {
        let position = |id: &NodeId| self.order.get(id).copied().unwrap_or(usize::MAX);
        position(&a).cmp(&position(&b))
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.element(node).map_or("", |el| el.value().name())
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.value().attr(name)
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
    }

    fn outer_html(&self, node: NodeId) -> String {
        self.element(node).map(|el| el.html()).unwrap_or_default()
    }

    fn box_size(&self, node: NodeId) -> Option<BoxSize> {
        let element = self.element(node)?.value();
        let style = element.attr("style").unwrap_or("");
        let dimension = |property: &str| {
            inline_declaration(style, property)
                .and_then(parse_px)
                .or_else(|| element.attr(property).and_then(parse_px))
        };

        Some(BoxSize {
            width: dimension("width")?,
            height: dimension("height")?,
        })
    }

    fn is_visible(&self, node: NodeId) -> bool {
        let mut current = self.element(node);
        while let Some(element) = current {
            if self.hides_itself(element) {
                return false;
            }
            current = element.parent().and_then(ElementRef::wrap);
        }
        true
    }

    fn title(&self) -> String {
        self.html
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    }

    fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> HtmlDocument {
        HtmlDocument::parse(html, None)
    }

    #[test]
    fn test_query_all_is_document_ordered() {
        let d = doc("<body><h2>b</h2><div><h1>a</h1></div><h3>c</h3></body>");
        let headings = d.query_all("h1, h2, h3").expect("valid selector");
        let texts: Vec<String> = headings.iter().map(|&n| d.text_content(n)).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
        assert_eq!(
            d.compare_document_order(headings[0], headings[1]),
            Ordering::Less
        );
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let d = doc("<p>x</p>");
        assert!(matches!(
            d.query_all("p[[["),
            Err(DocumentError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_sibling_and_parent_traversal() {
        let d = doc("<body><section><h2>T</h2>text<p>one</p></section></body>");
        let h2 = d.query_first("h2").expect("valid").expect("h2 present");
        let p = d.next_element_sibling(h2).expect("sibling");
        assert_eq!(d.tag_name(p), "p");
        let section = d.parent(h2).expect("parent");
        assert_eq!(d.tag_name(section), "section");
        assert_eq!(d.closest(p, "section").expect("valid"), Some(section));
        assert_eq!(d.children(section).len(), 2);
    }

    #[test]
    fn test_visibility_inherits_from_ancestors() {
        let d = doc(
            r#"<body>
                <div style="display:none"><p id="a">hidden</p></div>
                <p id="b" hidden>also hidden</p>
                <p id="c" style="opacity: 0">transparent</p>
                <p id="d">shown</p>
            </body>"#,
        );
        let visible = |id: &str| {
            let node = d.query_first(&format!("#{id}")).expect("valid").expect("present");
            d.is_visible(node)
        };
        assert!(!visible("a"));
        assert!(!visible("b"));
        assert!(!visible("c"));
        assert!(visible("d"));
    }

    #[test]
    fn test_box_size_from_inline_style_and_attributes() {
        let d = doc(
            r#"<body>
                <div id="styled" style="width: 640px; height:120px"></div>
                <table id="legacy" width="300" height="80"></table>
                <div id="unknown"></div>
            </body>"#,
        );
        let size = |id: &str| {
            let node = d.query_first(&format!("#{id}")).expect("valid").expect("present");
            d.box_size(node)
        };
        assert_eq!(size("styled"), Some(BoxSize { width: 640.0, height: 120.0 }));
        assert_eq!(size("legacy"), Some(BoxSize { width: 300.0, height: 80.0 }));
        assert_eq!(size("unknown"), None);
    }

    #[test]
    fn test_title() {
        let d = doc("<html><head><title> Acme | Home </title></head><body></body></html>");
        assert_eq!(d.title(), "Acme | Home");
    }
}
