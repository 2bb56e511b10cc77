//! Table discovery and rendering.
//!
//! Tables are found out of document order by a fixed waterfall of four
//! strategies that all run over the whole document:
//!
//! 1. [`preformatted`]: pipe tables already laid out in `<pre>` blocks
//! 2. [`structural`]: real `<table>` elements
//! 3. [`chart`]: label/value pairs inside chart and stat widgets
//! 4. [`custom_div`]: div grids that behave like tables
//!
//! Every rendered table lands in a [`TablePool`], which the marker resolver
//! later drains as it substitutes placeholders.

pub mod cell_content;
pub mod chart;
pub mod custom_div;
pub mod detection;
pub mod formatter;
pub mod preformatted;
pub mod structural;

pub use cell_content::{extract_cell_content, icon_glyph};
pub use detection::{has_table_class, is_table_related};
pub use formatter::{column_widths, format_ascii_table};

use crate::config::ReadableConfig;
use crate::document::DocumentModel;

/// Extraction strategy that produced a table. Lower priority numbers win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableStrategy {
    Preformatted = 1,
    Structural = 2,
    Chart = 3,
    CustomDiv = 4,
}

impl TableStrategy {
    #[must_use]
    pub fn priority(self) -> u8 {
        self as u8
    }
}

/// A rendered table waiting to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCandidate<N> {
    pub content: String,
    pub source: Option<N>,
    pub strategy: TableStrategy,
}

/// Ordered pool of table candidates.
///
/// Insertion order is strategy order then discovery order, because the
/// strategies run in priority order. Each candidate can be taken once.
#[derive(Debug)]
pub struct TablePool<N> {
    candidates: Vec<TableCandidate<N>>,
}

impl<N> Default for TablePool<N> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<N: Copy + Eq> TablePool<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate unless one with byte-identical content is already pooled.
    ///
    /// Returns whether the candidate was added. Comparison is exact: two
    /// tables that differ only in whitespace are both kept.
    pub fn push_unique(&mut self, candidate: TableCandidate<N>) -> bool {
        if self
            .candidates
            .iter()
            .any(|existing| existing.content == candidate.content)
        {
            tracing::debug!(
                "Dropping duplicate {:?} table ({} bytes)",
                candidate.strategy,
                candidate.content.len()
            );
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    /// Remove the candidate produced from `source`.
    pub fn take_by_source(&mut self, source: N) -> Option<TableCandidate<N>> {
        self.take_first(|candidate| candidate.source == Some(source))
    }

    /// Remove the first candidate, in pool order, satisfying `predicate`.
    pub fn take_first<F>(&mut self, predicate: F) -> Option<TableCandidate<N>>
    where
        F: Fn(&TableCandidate<N>) -> bool,
    {
        let index = self.candidates.iter().position(predicate)?;
        Some(self.candidates.remove(index))
    }

    /// Remove the highest-priority candidate, earliest discovered on ties.
    pub fn take_highest_priority(&mut self) -> Option<TableCandidate<N>> {
        let best = self
            .candidates
            .iter()
            .map(|candidate| candidate.strategy.priority())
            .min()?;
        self.take_first(|candidate| candidate.strategy.priority() == best)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableCandidate<N>> {
        self.candidates.iter()
    }
}

/// Run all four strategies over `doc` and pool their tables.
///
/// A strategy that fails is logged and skipped; the remaining strategies
/// still run.
pub fn extract_tables<D: DocumentModel>(doc: &D, config: &ReadableConfig) -> TablePool<D::Node> {
    let mut pool = TablePool::new();

    let runs = [
        (
            TableStrategy::Preformatted,
            preformatted::extract_preformatted_tables(doc),
        ),
        (
            TableStrategy::Structural,
            structural::extract_structural_tables(doc, config.max_structural_rows()),
        ),
        (TableStrategy::Chart, chart::extract_chart_tables(doc)),
        (
            TableStrategy::CustomDiv,
            custom_div::extract_custom_div_tables(
                doc,
                config.max_custom_rows(),
                config.max_custom_tables(),
            ),
        ),
    ];

    for (strategy, result) in runs {
        match result {
            Ok(found) => {
                let mut added = 0usize;
                for (source, content) in found {
                    if pool.push_unique(TableCandidate {
                        content,
                        source: Some(source),
                        strategy,
                    }) {
                        added += 1;
                    }
                }
                tracing::debug!("{:?} strategy pooled {} table(s)", strategy, added);
            }
            Err(e) => {
                tracing::warn!("{:?} table strategy failed, skipping: {}", strategy, e);
            }
        }
    }

    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    fn candidate(content: &str, source: u32, strategy: TableStrategy) -> TableCandidate<u32> {
        TableCandidate {
            content: content.to_string(),
            source: Some(source),
            strategy,
        }
    }

    #[test]
    fn test_exact_string_dedup() {
        let mut pool = TablePool::new();
        assert!(pool.push_unique(candidate("| a |", 1, TableStrategy::Preformatted)));
        assert!(!pool.push_unique(candidate("| a |", 2, TableStrategy::Structural)));
        // Whitespace differences are not normalized away.
        assert!(pool.push_unique(candidate("|  a |", 3, TableStrategy::Structural)));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_highest_priority_prefers_earliest_on_ties() {
        let mut pool = TablePool::new();
        pool.push_unique(candidate("chart", 1, TableStrategy::Chart));
        pool.push_unique(candidate("first", 2, TableStrategy::Structural));
        pool.push_unique(candidate("second", 3, TableStrategy::Structural));

        let taken = pool.take_highest_priority().expect("pool not empty");
        assert_eq!(taken.content, "first");
        let taken = pool.take_highest_priority().expect("pool not empty");
        assert_eq!(taken.content, "second");
        let taken = pool.take_highest_priority().expect("pool not empty");
        assert_eq!(taken.content, "chart");
        assert!(pool.take_highest_priority().is_none());
    }

    #[test]
    fn test_take_by_source_consumes_once() {
        let mut pool = TablePool::new();
        pool.push_unique(candidate("t", 9, TableStrategy::CustomDiv));
        assert!(pool.take_by_source(9).is_some());
        assert!(pool.take_by_source(9).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_waterfall_orders_by_strategy() {
        let html = r#"<body>
            <table><tr><th>Plan</th><th>Price</th></tr><tr><td>Pro</td><td>10</td></tr></table>
            <pre>| Plan | Price |
|------|-------|
| Pro  | 10    |</pre>
        </body>"#;
        let doc = HtmlDocument::parse(html, None);
        let pool = extract_tables(&doc, &ReadableConfig::default());

        let strategies: Vec<TableStrategy> = pool.iter().map(|c| c.strategy).collect();
        assert_eq!(
            strategies,
            vec![TableStrategy::Preformatted, TableStrategy::Structural]
        );
    }
}
