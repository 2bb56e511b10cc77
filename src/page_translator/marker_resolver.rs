//! Second phase: swap table markers for pooled tables.

use crate::page_translator::context::{MarkerRegistry, OutputLine, marker_token};
use crate::page_translator::tables::{TableCandidate, TablePool};

/// Body lines with every marker substituted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedContent {
    pub lines: Vec<String>,
    /// Markers replaced by a table.
    pub resolved: usize,
    /// Markers left as literal tokens.
    pub unresolved: usize,
}

/// Lowercase, alphanumeric words separated by single spaces.
#[must_use]
pub fn normalize_for_match(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_candidate<N: Copy + Eq>(
    source: Option<N>,
    anchor_text: Option<&str>,
    pool: &mut TablePool<N>,
) -> Option<TableCandidate<N>> {
    if let Some(found) = source.and_then(|node| pool.take_by_source(node)) {
        return Some(found);
    }

    if let Some(anchor) = anchor_text.map(normalize_for_match).filter(|a| !a.is_empty()) {
        if let Some(found) =
            pool.take_first(|candidate| normalize_for_match(&candidate.content).contains(&anchor))
        {
            return Some(found);
        }
    }

    pool.take_highest_priority()
}

/// Resolve markers in output order.
///
/// Each marker takes, in order of preference: the table built from its own
/// source node, a table whose text contains its anchor heading, or the
/// highest-priority table left. Each table is used at most once; markers
/// that find nothing stay as `[TABLE_MARKER:<id>]`. Tables no marker claimed
/// are dropped.
pub fn resolve_markers<N: Copy + Eq>(
    lines: Vec<OutputLine>,
    registry: &mut MarkerRegistry<N>,
    pool: &mut TablePool<N>,
) -> ResolvedContent {
    let mut resolved = ResolvedContent::default();

    for line in lines {
        match line {
            OutputLine::Text(text) => resolved.lines.push(text),
            OutputLine::Marker(id) => {
                let candidate = registry.take(id).and_then(|entry| {
                    find_candidate(entry.source, entry.anchor_text.as_deref(), pool)
                });
                match candidate {
                    Some(table) => {
                        tracing::debug!("Marker {} resolved with {:?} table", id, table.strategy);
                        resolved.lines.push(table.content);
                        resolved.resolved += 1;
                    }
                    None => {
                        resolved.lines.push(marker_token(id));
                        resolved.unresolved += 1;
                    }
                }
            }
        }
    }

    if !pool.is_empty() {
        tracing::debug!("Discarding {} unclaimed table(s)", pool.len());
    }

    resolved
}
