//! Pipe tables that already exist as preformatted text.

use crate::document::{DocumentError, DocumentModel};

/// The trimmed text of a `<pre>` block when it holds a pipe table.
///
/// Needs at least three lines (header, rule, one row) and a line that both
/// starts and ends with `|`. The text is returned verbatim otherwise.
#[must_use]
pub fn markdown_table_passthrough(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 3 {
        return None;
    }

    let has_pipe_row = lines.iter().any(|line| {
        let line = line.trim();
        line.starts_with('|') && line.ends_with('|')
    });

    has_pipe_row.then_some(trimmed)
}

/// All `<pre>` pipe tables in document order.
pub fn extract_preformatted_tables<D: DocumentModel>(
    doc: &D,
) -> Result<Vec<(D::Node, String)>, DocumentError> {
    Ok(doc
        .query_all("pre")?
        .into_iter()
        .filter_map(|pre| {
            let text = doc.text_content(pre);
            markdown_table_passthrough(&text).map(|table| (pre, table.to_string()))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    #[test]
    fn test_passthrough_is_verbatim() {
        let text = "\n  | Plan | Price |\n|---|---|\n| Pro | 10 |  \n";
        assert_eq!(
            markdown_table_passthrough(text),
            Some("| Plan | Price |\n|---|---|\n| Pro | 10 |")
        );
    }

    #[test]
    fn test_too_few_lines() {
        assert_eq!(markdown_table_passthrough("| a |\n|---|"), None);
    }

    #[test]
    fn test_lone_pipe_line_counts_as_row() {
        let text = "Results\n|\nsee above";
        assert_eq!(markdown_table_passthrough(text), Some(text));
    }

    #[test]
    fn test_code_blocks_are_ignored() {
        assert_eq!(
            markdown_table_passthrough("let a = b | c;\nlet d = 1;\nprintln!()"),
            None
        );
    }

    #[test]
    fn test_extracts_only_pipe_blocks() {
        let doc = HtmlDocument::parse(
            "<pre>fn main() {}\n\n}</pre><pre>| a | b |\n|---|---|\n| 1 | 2 |</pre>",
            None,
        );
        let tables = extract_preformatted_tables(&doc).expect("valid selector");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].1, "| a | b |\n|---|---|\n| 1 | 2 |");
    }
}
