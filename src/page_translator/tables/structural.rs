//! Real `<table>` elements (and `role="table"` containers) rendered as ASCII tables.

use super::cell_content::extract_cell_content;
use super::formatter::{column_widths, format_ascii_table};
use crate::document::{DocumentError, DocumentModel};

const TABLE_SELECTOR: &str = r#"table, [role="table"]"#;

/// Rows that belong to `table` itself, not to a nested table.
fn own_rows<D: DocumentModel>(doc: &D, table: D::Node) -> Result<Vec<D::Node>, DocumentError> {
    let mut rows = Vec::new();
    for row in doc.query_all_within(table, "tr")? {
        if doc.closest(row, TABLE_SELECTOR)? == Some(table) {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn row_cells<D: DocumentModel>(doc: &D, row: D::Node) -> Result<Vec<String>, DocumentError> {
    doc.children(row)
        .into_iter()
        .filter(|&cell| matches!(doc.tag_name(cell), "td" | "th"))
        .map(|cell| extract_cell_content(doc, cell))
        .collect()
}

/// Render one `<table>`.
///
/// The first row is the header. Up to `max_rows` following rows are padded or
/// truncated to the header width; rows left entirely empty are dropped.
/// Returns `None` when there is no header cell or no data row survives.
pub fn render_structural_table<D: DocumentModel>(
    doc: &D,
    table: D::Node,
    max_rows: usize,
) -> Result<Option<String>, DocumentError> {
    let rows = own_rows(doc, table)?;
    let Some((&header_row, data_rows)) = rows.split_first() else {
        return Ok(None);
    };

    let headers = row_cells(doc, header_row)?;
    if headers.is_empty() {
        return Ok(None);
    }

    let mut body = Vec::new();
    for &row in data_rows.iter().take(max_rows) {
        let mut cells = row_cells(doc, row)?;
        cells.resize(headers.len(), String::new());
        if cells.iter().all(String::is_empty) {
            continue;
        }
        body.push(cells);
    }

    if body.is_empty() {
        return Ok(None);
    }

    let widths = column_widths(&headers, &body);
    Ok(Some(format_ascii_table(&headers, &body, &widths)))
}

/// Every `<table>` or `role="table"` container that renders to a table.
///
/// A table that fails to render is logged and skipped.
pub fn extract_structural_tables<D: DocumentModel>(
    doc: &D,
    max_rows: usize,
) -> Result<Vec<(D::Node, String)>, DocumentError> {
    let mut tables = Vec::new();
    for table in doc.query_all(TABLE_SELECTOR)? {
        match render_structural_table(doc, table, max_rows) {
            Ok(Some(rendered)) => tables.push((table, rendered)),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping table {:?}: {}", table, e),
        }
    }
    Ok(tables)
}
