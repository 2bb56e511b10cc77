//! Text cleanup and inline link rewriting.
//!
//! `clean_text` is the single normalization applied to every string the
//! readable view emits. It keeps a deliberately small character set:
//! ASCII word characters, whitespace and `- . , ! ? ( ) | @ + % / : [ ]`.
//! Everything else is dropped, not escaped.

use crate::document::{DocumentError, DocumentModel};
use crate::page_translator::tables::is_table_related;
use crate::utils::{is_same_origin, link_href};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_RUN: hardcoded regex is valid")
});

/// Anchors flagged `machine:hidden` are decoration, not links to rewrite.
const LINK_SELECTOR: &str = r"a[href]:not(.machine\:hidden)";
/// Spans holding markdown the page already rendered elsewhere.
const PRERENDERED_SPAN_SELECTOR: &str = r"span.not-machine\:hidden";

const ALLOWED_PUNCTUATION: &[char] = &[
    '-', '.', ',', '!', '?', '(', ')', '|', '@', '+', '%', '/', ':', '[', ']',
];

#[inline]
fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

fn strip_disallowed(text: &str) -> String {
    text.chars().filter(|&c| is_allowed_char(c)).collect()
}

/// Normalize a raw text fragment.
///
/// Trims, collapses whitespace (newlines included) to single spaces, then
/// drops every character outside the allowed set.
///
/// ```rust
/// # use kodegen_tools_readable::page_translator::clean_text;
/// assert_eq!(clean_text("  Hello,\n\n   world™ "), "Hello, world");
/// assert_eq!(clean_text(""), "");
/// ```
#[must_use]
pub fn clean_text(raw: &str) -> String {
    strip_disallowed(&collapse_whitespace(raw.trim()))
}

enum Piece {
    Raw(String),
    Link(String),
}

/// Replace every occurrence of `pattern` in the raw pieces with `markdown`.
fn substitute_link(pieces: Vec<Piece>, pattern: &str, markdown: &str) -> Vec<Piece> {
    let mut out = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match piece {
            Piece::Raw(raw) if raw.contains(pattern) => {
                let mut parts = raw.split(pattern).peekable();
                while let Some(part) = parts.next() {
                    if !part.is_empty() {
                        out.push(Piece::Raw(part.to_string()));
                    }
                    if parts.peek().is_some() {
                        out.push(Piece::Link(markdown.to_string()));
                    }
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Markdown for one inline link.
///
/// Cross-origin targets are written as `[text]($href)`. The `$` is part of the
/// established output format and downstream readers key on it.
#[must_use]
pub fn inline_link(label: &str, href: &str, same_origin: bool) -> String {
    if same_origin {
        format!("[{label}]({href})")
    } else {
        format!("[{label}](${href})")
    }
}

/// Node text with every anchor rewritten as a markdown link.
///
/// Returns `Ok(None)` for table-related nodes: their content belongs to table
/// extraction and must not also show up as prose.
///
/// Every literal occurrence of an anchor's text is replaced, not just the
/// anchor's own position. Anchors classed `machine:hidden` stay plain text and
/// `span.not-machine:hidden` content is dropped. The surrounding prose goes through [`clean_text`];
/// inserted links are kept intact so URL characters survive.
///
/// # Errors
///
/// Returns an error if the anchor query fails for this node.
pub fn extract_text_with_links<D: DocumentModel>(
    doc: &D,
    node: D::Node,
) -> Result<Option<String>, DocumentError> {
    if is_table_related(doc, node) {
        return Ok(None);
    }

    let mut text = doc.text_content(node);
    for span in doc.query_all_within(node, PRERENDERED_SPAN_SELECTOR)? {
        let span_text = doc.text_content(span);
        if !span_text.is_empty() {
            text = text.replacen(&span_text, "", 1);
        }
    }

    let mut pieces = vec![Piece::Raw(text)];

    for anchor in doc.query_all_within(node, LINK_SELECTOR)? {
        let anchor_text = doc.text_content(anchor);
        if anchor_text.trim().is_empty() {
            continue;
        }

        let href = match link_href(doc.base_url(), doc.attr(anchor, "href")) {
            Ok(Some(href)) => href,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!("Skipping anchor with unusable href: {}", e);
                continue;
            }
        };

        let markdown = inline_link(
            &clean_text(&anchor_text),
            &href,
            is_same_origin(doc.base_url(), &href),
        );
        pieces = substitute_link(pieces, &anchor_text, &markdown);
    }

    let mut joined = String::new();
    for piece in pieces {
        match piece {
            Piece::Raw(raw) => joined.push_str(&strip_disallowed(&raw)),
            Piece::Link(link) => joined.push_str(&link),
        }
    }

    Ok(Some(collapse_whitespace(joined.trim())))
}
