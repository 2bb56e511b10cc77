//! Fixed-width bordered table rendering.
//!
//! ```text
//!
//! +----------+----------+
//! | Plan     | Price    |
//! +----------+----------+
//! | Pro      | 10       |
//!
//! | Team     | 20       |
//! +----------+----------+
//!
//! ```
//!
//! Consecutive data rows are separated by a blank line. Widths are counted in
//! characters, never below [`MIN_COLUMN_WIDTH`].

/// Narrowest column the renderer produces.
pub const MIN_COLUMN_WIDTH: usize = 8;

/// Width of each column: the longest of its header and cells, at least [`MIN_COLUMN_WIDTH`].
#[must_use]
pub fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_WIDTH)
        })
        .collect()
}

fn border(widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|width| "-".repeat(width + 2)).collect();
    format!("+{}+", segments.join("+"))
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let rendered: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(column, &width)| {
            let cell = cells.get(column).map_or("", String::as_str);
            format!(" {cell:<width$} ")
        })
        .collect();
    format!("|{}|", rendered.join("|"))
}

/// Render headers and rows as a bordered table.
///
/// Cells beyond `widths.len()` are ignored; missing cells render empty.
#[must_use]
pub fn format_ascii_table(headers: &[String], rows: &[Vec<String>], widths: &[usize]) -> String {
    let rule = border(widths);
    let mut lines = Vec::with_capacity(rows.len() * 2 + 6);

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push(row_line(headers, widths));
    lines.push(rule.clone());
    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.push(row_line(row, widths));
    }
    lines.push(rule);
    lines.push(String::new());

    lines.join("\n")
}
