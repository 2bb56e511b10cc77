//! Final layout of the readable view.

use crate::config::ReadableConfig;
use crate::document::{DocumentError, DocumentModel};
use crate::page_translator::context::ExtractionContext;
use crate::page_translator::marker_resolver::ResolvedContent;
use crate::page_translator::navigation::NavigationData;
use crate::page_translator::text_normalizer::clean_text;
use crate::utils::link_href;

const FALLBACK_SELECTOR: &str = "p, div, span, h1, h2, h3, h4, h5, h6, li, td, th";

/// Fallback text must be strictly longer than this.
const MIN_FALLBACK_TEXT_CHARS: usize = 15;
/// Fallback text must be strictly shorter than this.
const MAX_FALLBACK_TEXT_CHARS: usize = 500;

const SECTION_GAP: usize = 3;

/// Everything the assembler lays out, already extracted.
#[derive(Debug, Clone, Default)]
pub struct AssemblyParts {
    pub navigation: NavigationData,
    pub content: ResolvedContent,
    pub footer: Vec<String>,
}

fn section_divider(name: &str) -> String {
    format!(r#"<div class="section-divider"><!-- {name} --></div>"#)
}

/// Append a section, preceded by its divider when enabled. Returns the
/// number of content lines added; dividers do not count.
fn push_section(lines: &mut Vec<String>, dividers: bool, name: &str, body: Vec<String>) -> usize {
    if dividers {
        lines.push(section_divider(name));
    }
    let added = body.len();
    lines.extend(body);
    added
}

/// Links inside the first `<footer>`, as `[text](href)`.
pub fn extract_footer_links<D: DocumentModel>(
    doc: &D,
    limit: usize,
) -> Result<Vec<String>, DocumentError> {
    let Some(footer) = doc.query_first("footer")? else {
        return Ok(Vec::new());
    };

    let mut links = Vec::new();
    for anchor in doc.query_all_within(footer, "a")? {
        if links.len() >= limit {
            break;
        }
        let text = doc.text_content(anchor);
        if text.trim().is_empty() {
            continue;
        }
        match link_href(doc.base_url(), doc.attr(anchor, "href")) {
            Ok(Some(href)) => links.push(format!("[{}]({href})", clean_text(&text))),
            Ok(None) => {}
            Err(e) => tracing::debug!("Skipping footer link: {}", e),
        }
    }
    Ok(links)
}

/// Visible text blocks nothing else emitted, for near-empty pages.
pub fn extract_fallback_content<D: DocumentModel>(
    doc: &D,
    ctx: &mut ExtractionContext<D::Node>,
    limit: usize,
) -> Result<Vec<String>, DocumentError> {
    let mut content = Vec::new();

    for node in doc.query_all(FALLBACK_SELECTOR)? {
        if content.len() >= limit {
            break;
        }
        if ctx.is_processed(node) {
            continue;
        }

        let text = clean_text(&doc.text_content(node));
        let length = text.chars().count();
        if length <= MIN_FALLBACK_TEXT_CHARS
            || length >= MAX_FALLBACK_TEXT_CHARS
            || ctx.has_text(&text)
            || !doc.is_visible(node)
        {
            continue;
        }

        ctx.record_emitted(node, text.clone());
        content.push(text);
    }

    Ok(content)
}

/// Lay out navigation, body and footer as one string.
///
/// Lines are joined with `\n`; blank lines give the paragraph breaks. When
/// fewer than `min_content_items` lines were laid out, visible text found
/// anywhere in the document is appended.
pub fn assemble<D: DocumentModel>(
    doc: &D,
    ctx: &mut ExtractionContext<D::Node>,
    parts: AssemblyParts,
    config: &ReadableConfig,
) -> String {
    let dividers = config.section_dividers();
    let mut lines: Vec<String> = vec![String::new()];
    let mut items = lines.len();

    let AssemblyParts {
        navigation,
        content,
        footer,
    } = parts;

    let mut nav_block = Vec::new();
    if let Some(brand) = navigation.brand {
        nav_block.push(format!(r#"<span class="brand-name">{brand}</span>"#));
    }
    nav_block.extend(navigation.links);
    nav_block.extend(navigation.ctas);
    nav_block.extend(std::iter::repeat_n(String::new(), SECTION_GAP));
    items += push_section(&mut lines, dividers, "NAVIGATION", nav_block);

    items += push_section(&mut lines, dividers, "MAIN CONTENT", content.lines);

    if !footer.is_empty() {
        let mut footer_block = vec![String::new(); SECTION_GAP];
        footer_block.extend(footer);
        items += push_section(&mut lines, dividers, "FOOTER", footer_block);
    }

    if items < config.min_content_items() {
        tracing::debug!("Only {} item(s) assembled, scanning for visible text", items);
        match extract_fallback_content(doc, ctx, config.max_fallback_items()) {
            Ok(fallback) if !fallback.is_empty() => {
                push_section(&mut lines, dividers, "FALLBACK", fallback);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Fallback content scan failed: {}", e),
        }
    }

    lines.push(String::new());
    lines.join("\n")
}
