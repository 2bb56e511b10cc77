//! Document-order walk over headings and the content that follows them.
//!
//! Produces the main body as [`OutputLine`]s. Anything table-related is not
//! rendered here; it becomes an [`OutputLine::Marker`] that the resolver later
//! swaps for a pooled table.

use crate::config::ReadableConfig;
use crate::document::{DocumentError, DocumentModel};
use crate::page_translator::context::{ExtractionContext, MarkerEntry, MarkerKind, OutputLine};
use crate::page_translator::tables::is_table_related;
use crate::page_translator::text_normalizer::{clean_text, extract_text_with_links};

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Elements that make a `div` a layout wrapper rather than a paragraph.
const BLOCK_SELECTOR: &str = "p, div, section, article, main, aside, header, footer, nav, \
                              ul, ol, li, table, pre, blockquote, form, figure, \
                              h1, h2, h3, h4, h5, h6";

/// Associated paragraphs must be longer than this.
const MIN_ASSOCIATED_CHARS: usize = 10;
/// Fallback paragraphs must be longer than this.
const MIN_FALLBACK_CHARS: usize = 20;

const MAJOR_SECTION_GAP: usize = 3;
const MINOR_SECTION_GAP: usize = 1;

fn heading_level(tag: &str) -> Option<usize> {
    match tag.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(usize::from(digit - b'0')),
        _ => None,
    }
}

fn is_paragraph_like(tag: &str) -> bool {
    matches!(tag, "p" | "div")
}

fn is_list(tag: &str) -> bool {
    matches!(tag, "ul" | "ol")
}

/// Push a blank line unless the output is empty or already ends in one.
fn ensure_blank(lines: &mut Vec<OutputLine>) {
    if lines.last().is_some_and(|line| !line.is_blank()) {
        lines.push(OutputLine::blank());
    }
}

fn push_marker<N>(
    lines: &mut Vec<OutputLine>,
    ctx: &mut ExtractionContext<N>,
    entry: MarkerEntry<N>,
) where
    N: Copy + Eq + std::hash::Hash,
{
    let id = ctx.markers.register(entry);
    ensure_blank(lines);
    lines.push(OutputLine::Marker(id));
    lines.push(OutputLine::blank());
}

/// A list as `- item` lines, one per `<li>`.
pub fn render_list<D: DocumentModel>(doc: &D, list: D::Node) -> Result<String, DocumentError> {
    Ok(doc
        .query_all_within(list, "li")?
        .into_iter()
        .map(|item| format!("- {}", clean_text(&doc.text_content(item))))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Element types nested in an emitted paragraph that later walks must skip.
const NESTED_CONTENT_SELECTOR: &str = "p, div, ul, ol";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiblingOutcome {
    /// Emitted; counts toward the per-heading cap.
    Counted,
    Ignored,
    /// A wrapper holding a later heading; that heading owns its content.
    EndOfSection,
}

fn contains_heading<D: DocumentModel>(doc: &D, node: D::Node) -> Result<bool, DocumentError> {
    Ok(!doc.query_all_within(node, HEADING_SELECTOR)?.is_empty())
}

/// Handle one sibling after a heading.
fn walk_sibling<D: DocumentModel>(
    doc: &D,
    sibling: D::Node,
    heading_text: &str,
    ctx: &mut ExtractionContext<D::Node>,
    lines: &mut Vec<OutputLine>,
) -> Result<SiblingOutcome, DocumentError> {
    if ctx.is_processed(sibling) {
        return Ok(SiblingOutcome::Ignored);
    }

    if is_table_related(doc, sibling) {
        push_marker(
            lines,
            ctx,
            MarkerEntry {
                source: Some(sibling),
                anchor_text: Some(heading_text.to_string()),
                kind: MarkerKind::Associated,
            },
        );
        ctx.mark_processed(sibling);
        return Ok(SiblingOutcome::Counted);
    }

    if contains_heading(doc, sibling)? {
        return Ok(SiblingOutcome::EndOfSection);
    }

    let tag = doc.tag_name(sibling);
    if is_paragraph_like(tag) {
        let Some(text) = extract_text_with_links(doc, sibling)? else {
            return Ok(SiblingOutcome::Ignored);
        };
        if text.chars().count() > MIN_ASSOCIATED_CHARS && !ctx.has_text(&text) {
            lines.push(OutputLine::Text(text.clone()));
            ctx.record_emitted(sibling, text);
            for nested in doc.query_all_within(sibling, NESTED_CONTENT_SELECTOR)? {
                ctx.mark_processed(nested);
            }
            return Ok(SiblingOutcome::Counted);
        }
    } else if is_list(tag) {
        let list = render_list(doc, sibling)?;
        if !list.is_empty() && !ctx.has_text(&list) {
            ensure_blank(lines);
            lines.push(OutputLine::Text(list.clone()));
            lines.push(OutputLine::blank());
            ctx.record_emitted(sibling, list);
            return Ok(SiblingOutcome::Counted);
        }
    }

    Ok(SiblingOutcome::Ignored)
}

fn walk_heading<D: DocumentModel>(
    doc: &D,
    heading: D::Node,
    ctx: &mut ExtractionContext<D::Node>,
    lines: &mut Vec<OutputLine>,
    max_associated: usize,
) {
    let Some(level) = heading_level(doc.tag_name(heading)) else {
        return;
    };
    let text = clean_text(&doc.text_content(heading));
    if text.is_empty() || ctx.has_text(&text) {
        return;
    }

    if is_table_related(doc, heading) {
        push_marker(
            lines,
            ctx,
            MarkerEntry {
                source: Some(heading),
                anchor_text: Some(text),
                kind: MarkerKind::Heading,
            },
        );
        ctx.mark_processed(heading);
        return;
    }

    if !lines.is_empty() {
        let gap = if level <= 2 {
            MAJOR_SECTION_GAP
        } else {
            MINOR_SECTION_GAP
        };
        lines.extend(std::iter::repeat_n(OutputLine::blank(), gap));
    }
    lines.push(OutputLine::Text(format!("{} {text}", "#".repeat(level))));
    ctx.record_emitted(heading, text.clone());

    let mut accepted = 0;
    let mut next = doc.next_element_sibling(heading);
    while let Some(sibling) = next {
        if accepted >= max_associated || heading_level(doc.tag_name(sibling)).is_some() {
            break;
        }
        match walk_sibling(doc, sibling, &text, ctx, lines) {
            Ok(SiblingOutcome::Counted) => accepted += 1,
            Ok(SiblingOutcome::Ignored) => {}
            Ok(SiblingOutcome::EndOfSection) => break,
            Err(e) => tracing::warn!("Skipping content after heading {:?}: {}", text, e),
        }
        next = doc.next_element_sibling(sibling);
    }
}

/// Paragraphs and leaf `div`s, for pages without usable headings.
fn fallback_candidates<D: DocumentModel>(doc: &D) -> Result<Vec<D::Node>, DocumentError> {
    let mut candidates = Vec::new();
    for node in doc.query_all("p, div")? {
        if doc.tag_name(node) == "div" && !doc.query_all_within(node, BLOCK_SELECTOR)?.is_empty() {
            continue;
        }
        candidates.push(node);
    }
    Ok(candidates)
}

fn walk_fallback<D: DocumentModel>(
    doc: &D,
    ctx: &mut ExtractionContext<D::Node>,
    lines: &mut Vec<OutputLine>,
) -> Result<(), DocumentError> {
    for node in fallback_candidates(doc)? {
        if ctx.is_processed(node) {
            continue;
        }

        if is_table_related(doc, node) {
            push_marker(
                lines,
                ctx,
                MarkerEntry {
                    source: Some(node),
                    anchor_text: None,
                    kind: MarkerKind::Paragraph,
                },
            );
            ctx.mark_processed(node);
            continue;
        }

        let text = match extract_text_with_links(doc, node) {
            Ok(Some(text)) => text,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("Skipping fallback paragraph {:?}: {}", node, e);
                continue;
            }
        };
        if text.chars().count() > MIN_FALLBACK_CHARS && !ctx.has_text(&text) {
            ensure_blank(lines);
            lines.push(OutputLine::Text(text.clone()));
            ctx.record_emitted(node, text);
        }
    }
    Ok(())
}

/// Walk every unprocessed heading in document order.
///
/// When no heading yields output, falls back to a document-wide paragraph
/// scan. Failures on a single node are logged and the walk moves on.
pub fn walk_headings<D: DocumentModel>(
    doc: &D,
    ctx: &mut ExtractionContext<D::Node>,
    config: &ReadableConfig,
) -> Vec<OutputLine> {
    let mut lines = Vec::new();

    match doc.query_all(HEADING_SELECTOR) {
        Ok(mut headings) => {
            headings.retain(|&heading| !ctx.is_processed(heading));
            headings.sort_by(|&a, &b| doc.compare_document_order(a, b));
            for heading in headings {
                walk_heading(doc, heading, ctx, &mut lines, config.max_associated_items());
            }
        }
        Err(e) => tracing::warn!("Heading query failed: {}", e),
    }

    if lines.is_empty() {
        tracing::debug!("No heading content, scanning paragraphs");
        if let Err(e) = walk_fallback(doc, ctx, &mut lines) {
            tracing::warn!("Paragraph fallback failed: {}", e);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    fn walk(html: &str) -> (Vec<OutputLine>, ExtractionContext<ego_tree::NodeId>) {
        let doc = HtmlDocument::parse(html, None);
        let mut ctx = ExtractionContext::new();
        let lines = walk_headings(&doc, &mut ctx, &ReadableConfig::default());
        (lines, ctx)
    }

    fn text(line: &str) -> OutputLine {
        OutputLine::Text(line.to_string())
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("header"), None);
    }

    #[test]
    fn test_heading_with_paragraph_and_list() {
        let (lines, _) = walk(
            "<h1>Intro</h1><p>Welcome to the product tour.</p>\
             <ul><li>Fast</li><li>Safe</li></ul><h3>Details</h3><p>short</p>",
        );
        assert_eq!(
            lines,
            vec![
                text("# Intro"),
                text("Welcome to the product tour."),
                OutputLine::blank(),
                text("- Fast\n- Safe"),
                OutputLine::blank(),
                OutputLine::blank(),
                text("### Details"),
            ]
        );
    }

    #[test]
    fn test_major_sections_get_wider_gap() {
        let (lines, _) = walk("<h2>One</h2><h2>Two</h2>");
        assert_eq!(
            lines,
            vec![
                text("## One"),
                OutputLine::blank(),
                OutputLine::blank(),
                OutputLine::blank(),
                text("## Two"),
            ]
        );
    }

    #[test]
    fn test_duplicate_heading_text_skipped() {
        let (lines, _) = walk("<h2>FAQ</h2><h2>FAQ</h2>");
        assert_eq!(lines, vec![text("## FAQ")]);
    }

    #[test]
    fn test_table_sibling_becomes_marker() {
        let (lines, ctx) = walk(
            "<h2>Pricing</h2><table><tr><th>Plan</th></tr><tr><td>Pro</td></tr></table>",
        );
        assert_eq!(
            lines,
            vec![
                text("## Pricing"),
                OutputLine::blank(),
                OutputLine::Marker(0),
                OutputLine::blank(),
            ]
        );
        let entry = ctx.markers.get(0).expect("marker registered");
        assert_eq!(entry.kind, MarkerKind::Associated);
        assert_eq!(entry.anchor_text.as_deref(), Some("Pricing"));
    }

    #[test]
    fn test_table_related_heading_stands_in_for_section() {
        let (lines, ctx) = walk(r#"<h2 class="stats-heading">Usage stats</h2><p>Plain paragraph text.</p>"#);
        assert_eq!(lines, vec![OutputLine::Marker(0), OutputLine::blank()]);
        assert_eq!(ctx.markers.get(0).map(|e| e.kind), Some(MarkerKind::Heading));
    }

    #[test]
    fn test_associated_items_capped() {
        let mut html = String::from("<h2>Notes</h2>");
        for i in 0..8 {
            html.push_str(&format!("<p>Paragraph number {i} here.</p>"));
        }
        let (lines, _) = walk(&html);
        let paragraphs = lines
            .iter()
            .filter(|l| matches!(l, OutputLine::Text(t) if t.starts_with("Paragraph")))
            .count();
        assert_eq!(paragraphs, 5);
    }

    #[test]
    fn test_fallback_without_headings() {
        let (lines, ctx) = walk(
            r#"<p>The first paragraph is long enough.</p>
               <p class="stats">Category  Score and more text here</p>
               <div>The closing leaf block is long enough.</div>"#,
        );
        assert_eq!(
            lines,
            vec![
                text("The first paragraph is long enough."),
                OutputLine::blank(),
                OutputLine::Marker(0),
                OutputLine::blank(),
                text("The closing leaf block is long enough."),
            ]
        );
        assert_eq!(ctx.markers.get(0).map(|e| e.kind), Some(MarkerKind::Paragraph));
    }

    #[test]
    fn test_wrapper_holding_a_heading_ends_the_section() {
        let (lines, _) = walk(
            r#"<h1>Welcome</h1><div class="content"><h2>Features</h2><p>Fast deploys with zero config everywhere.</p></div>"#,
        );
        assert_eq!(
            lines,
            vec![
                text("# Welcome"),
                OutputLine::blank(),
                OutputLine::blank(),
                OutputLine::blank(),
                text("## Features"),
                text("Fast deploys with zero config everywhere."),
            ]
        );
    }

    #[test]
    fn test_emitted_container_claims_nested_blocks() {
        let doc = HtmlDocument::parse(
            "<h2>About</h2><div><p>Nested paragraph inside a wrapper div.</p></div>",
            None,
        );
        let mut ctx = ExtractionContext::new();
        walk_headings(&doc, &mut ctx, &ReadableConfig::default());

        let nested = doc.query_first("p").expect("valid selector").expect("paragraph present");
        assert!(ctx.is_processed(nested));
    }
}
