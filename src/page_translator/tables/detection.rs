//! Table-related node classification.
//!
//! One predicate decides both sides of the table hand-off: the heading walker
//! defers any node it flags, and the prose extractor refuses to emit it. Keeping
//! a single implementation is what stops a table from appearing twice.

use crate::document::DocumentModel;

/// Class-name fragments that mark a container as tabular.
pub const TABLE_CLASS_HINTS: &[&str] = &[
    "table",
    "grid",
    "chart",
    "graph",
    "data-table",
    "pricing-table",
    "benchmark",
    "metrics",
    "stats",
];

/// Words that show up in comparison/benchmark text laid out as a table.
const TABULAR_KEYWORDS: &[&str] = &[" vs ", "Category", "Accuracy", "Win Rate"];

/// Whether a class attribute carries any table hint (case-insensitive).
#[must_use]
pub fn has_table_class(class_name: &str) -> bool {
    if class_name.is_empty() {
        return false;
    }
    let lower = class_name.to_lowercase();
    TABLE_CLASS_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Plain text laid out as columns: a tabular keyword, at least three non-empty
/// lines, and one line with a column separator (`|`, a double space or a tab).
///
/// Lines are trimmed first so markup indentation never counts as a separator.
#[must_use]
pub fn looks_like_text_table(text: &str) -> bool {
    if !TABULAR_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return false;
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines.len() >= 3
        && lines
            .iter()
            .any(|line| line.contains('|') || line.contains("  ") || line.contains('\t'))
}

fn is_table_element_or_hinted<D: DocumentModel>(doc: &D, node: D::Node) -> bool {
    doc.tag_name(node) == "table" || has_table_class(doc.class_name(node))
}

/// Classify a node as table-related.
///
/// True when any of:
/// 1. it is a `<table>`
/// 2. its class carries a table hint
/// 3. it is a `<pre>` whose text has both `|` and `-`
/// 4. it is a `<div>` whose text reads like a column layout
/// 5. any descendant satisfies 1 or 2
#[must_use]
pub fn is_table_related<D: DocumentModel>(doc: &D, node: D::Node) -> bool {
    if is_table_element_or_hinted(doc, node) {
        return true;
    }

    match doc.tag_name(node) {
        "pre" => {
            let text = doc.text_content(node);
            if text.contains('|') && text.contains('-') {
                return true;
            }
        }
        "div" => {
            if looks_like_text_table(&doc.text_content(node)) {
                return true;
            }
        }
        _ => {}
    }

    doc.descendants(node)
        .into_iter()
        .any(|descendant| is_table_element_or_hinted(doc, descendant))
}
