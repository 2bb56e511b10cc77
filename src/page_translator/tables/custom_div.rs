//! Div-based grids that read as tables.
//!
//! A container must pass every check before it is rendered:
//! - class hint (`table`, `grid`, `chart`, `data`, `pricing`, `comparison`, `stats`, `metrics`)
//! - rendered size within 100..=2000 by 50..=2000 px (unknown size passes)
//! - 2..=50 row-like children
//! - every row has the first row's cell count
//! - text not dominated by `<p>` prose

use super::cell_content::extract_cell_content;
use super::formatter::{column_widths, format_ascii_table};
use crate::document::{BoxSize, DocumentError, DocumentModel};
use std::collections::HashSet;

const CONTAINER_CLASS_HINTS: &[&str] = &[
    "table",
    "grid",
    "chart",
    "data",
    "pricing",
    "comparison",
    "stats",
    "metrics",
];

const ROW_SELECTOR: &str = "[class*=row], [class*=item], [class*=entry], tr, li";

const WIDTH_RANGE: (f64, f64) = (100.0, 2000.0);
const HEIGHT_RANGE: (f64, f64) = (50.0, 2000.0);
const ROW_COUNT_RANGE: (usize, usize) = (2, 50);
const HEADER_COUNT_RANGE: (usize, usize) = (2, 10);

/// Paragraph text at or above this share of the container text marks it as prose.
const PARAGRAPH_DOMINANCE: f64 = 0.8;
/// A table needs at least one data cell longer than this.
const MIN_SUBSTANTIAL_CELL_CHARS: usize = 3;

fn has_container_hint(class_name: &str) -> bool {
    let lower = class_name.to_lowercase();
    CONTAINER_CLASS_HINTS.iter().any(|hint| lower.contains(hint))
}

fn size_in_range(size: Option<BoxSize>) -> bool {
    size.is_none_or(|BoxSize { width, height }| {
        (WIDTH_RANGE.0..=WIDTH_RANGE.1).contains(&width)
            && (HEIGHT_RANGE.0..=HEIGHT_RANGE.1).contains(&height)
    })
}

/// Outermost row-like descendants; element children when fewer than two match.
fn find_rows<D: DocumentModel>(doc: &D, container: D::Node) -> Result<Vec<D::Node>, DocumentError> {
    let matched = doc.query_all_within(container, ROW_SELECTOR)?;
    let matched_set: HashSet<D::Node> = matched.iter().copied().collect();

    let outermost: Vec<D::Node> = matched
        .into_iter()
        .filter(|&row| {
            let mut current = doc.parent(row);
            while let Some(ancestor) = current {
                if ancestor == container {
                    return true;
                }
                if matched_set.contains(&ancestor) {
                    return false;
                }
                current = doc.parent(ancestor);
            }
            true
        })
        .collect();

    if outermost.len() >= 2 {
        Ok(outermost)
    } else {
        Ok(doc.children(container))
    }
}

fn has_consistent_cells<D: DocumentModel>(doc: &D, rows: &[D::Node]) -> bool {
    let Some(&first) = rows.first() else {
        return false;
    };
    let expected = doc.children(first).len();
    if expected < 2 {
        return false;
    }
    rows.iter().all(|&row| doc.children(row).len() == expected)
}

fn is_paragraph_dominated<D: DocumentModel>(doc: &D, container: D::Node) -> Result<bool, DocumentError> {
    let total = doc.text_content(container).trim().chars().count();
    if total == 0 {
        return Ok(true);
    }
    let paragraph_chars: usize = doc
        .query_all_within(container, "p")?
        .into_iter()
        .map(|p| doc.text_content(p).trim().chars().count())
        .sum();
    Ok((paragraph_chars as f64) >= total as f64 * PARAGRAPH_DOMINANCE)
}

fn row_cells<D: DocumentModel>(doc: &D, row: D::Node) -> Result<Vec<String>, DocumentError> {
    doc.children(row)
        .into_iter()
        .map(|cell| extract_cell_content(doc, cell))
        .collect()
}

/// Render a validated container, or `None` when any check fails.
pub fn render_custom_div_table<D: DocumentModel>(
    doc: &D,
    container: D::Node,
    max_rows: usize,
) -> Result<Option<String>, DocumentError> {
    if !size_in_range(doc.box_size(container)) {
        return Ok(None);
    }

    let rows = find_rows(doc, container)?;
    if !(ROW_COUNT_RANGE.0..=ROW_COUNT_RANGE.1).contains(&rows.len()) {
        return Ok(None);
    }
    if !has_consistent_cells(doc, &rows) || is_paragraph_dominated(doc, container)? {
        return Ok(None);
    }

    let headers = row_cells(doc, rows[0])?;
    if !(HEADER_COUNT_RANGE.0..=HEADER_COUNT_RANGE.1).contains(&headers.len())
        || headers.iter().any(String::is_empty)
    {
        return Ok(None);
    }

    let mut body = Vec::new();
    for &row in rows[1..].iter().take(max_rows) {
        let mut cells = row_cells(doc, row)?;
        cells.resize(headers.len(), String::new());
        let filled = cells.iter().filter(|cell| !cell.is_empty()).count();
        if filled * 2 >= headers.len() {
            body.push(cells);
        }
    }

    let substantial = body
        .iter()
        .flatten()
        .any(|cell| cell.chars().count() > MIN_SUBSTANTIAL_CELL_CHARS);
    if !substantial {
        return Ok(None);
    }

    let widths = column_widths(&headers, &body);
    Ok(Some(format_ascii_table(&headers, &body, &widths)))
}

/// Up to `max_tables` div tables in document order.
///
/// Containers nested inside an accepted one are skipped.
pub fn extract_custom_div_tables<D: DocumentModel>(
    doc: &D,
    max_rows: usize,
    max_tables: usize,
) -> Result<Vec<(D::Node, String)>, DocumentError> {
    let mut tables: Vec<(D::Node, String)> = Vec::new();

    for container in doc.query_all("div[class]")? {
        if tables.len() >= max_tables {
            break;
        }
        if !has_container_hint(doc.class_name(container)) {
            continue;
        }
        if tables
            .iter()
            .any(|&(outer, _)| doc.descendants(outer).contains(&container))
        {
            continue;
        }

        match render_custom_div_table(doc, container, max_rows) {
            Ok(Some(rendered)) => tables.push((container, rendered)),
            Ok(None) => {}
            Err(e) => tracing::debug!("Skipping div table {:?}: {}", container, e),
        }
    }

    Ok(tables)
}
