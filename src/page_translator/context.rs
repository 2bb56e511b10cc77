//! Per-invocation extraction state.
//!
//! One `ExtractionContext` is created per translation and threaded by `&mut`
//! through every stage. It owns the duplicate-suppression sets and the marker
//! registry, so nothing about a translation leaks into the next one.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Identifier of a deferred table placeholder, unique within one translation.
pub type MarkerId = usize;

/// Literal token left in the output when a marker finds no table.
#[must_use]
pub fn marker_token(id: MarkerId) -> String {
    format!("[TABLE_MARKER:{id}]")
}

/// Where a marker was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// The heading itself was classified as table-related.
    Heading,
    /// A paragraph-like node found by the no-heading fallback.
    Paragraph,
    /// A sibling gathered under a heading.
    Associated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerEntry<N> {
    pub source: Option<N>,
    pub anchor_text: Option<String>,
    pub kind: MarkerKind,
}

/// Registry of unresolved table placeholders.
#[derive(Debug)]
pub struct MarkerRegistry<N> {
    next_id: MarkerId,
    entries: HashMap<MarkerId, MarkerEntry<N>>,
}

impl<N> Default for MarkerRegistry<N> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: HashMap::new(),
        }
    }
}

impl<N> MarkerRegistry<N> {
    /// Register a placeholder and hand out its id.
    pub fn register(&mut self, entry: MarkerEntry<N>) -> MarkerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, entry);
        id
    }

    /// Remove and return an entry. A second call for the same id yields `None`.
    pub fn take(&mut self, id: MarkerId) -> Option<MarkerEntry<N>> {
        self.entries.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&MarkerEntry<N>> {
        self.entries.get(&id)
    }

    /// Number of markers still waiting for resolution.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Number of markers ever registered.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.next_id
    }
}

/// One line of walked content, before table placeholders are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Text(String),
    Marker(MarkerId),
}

impl OutputLine {
    #[must_use]
    pub fn blank() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

#[derive(Debug)]
pub struct ExtractionContext<N> {
    processed_nodes: HashSet<N>,
    processed_texts: HashSet<String>,
    pub markers: MarkerRegistry<N>,
}

impl<N> Default for ExtractionContext<N> {
    fn default() -> Self {
        Self {
            processed_nodes: HashSet::new(),
            processed_texts: HashSet::new(),
            markers: MarkerRegistry::default(),
        }
    }
}

impl<N: Copy + Eq + Hash> ExtractionContext<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_processed(&self, node: N) -> bool {
        self.processed_nodes.contains(&node)
    }

    pub fn mark_processed(&mut self, node: N) {
        self.processed_nodes.insert(node);
    }

    #[must_use]
    pub fn has_text(&self, text: &str) -> bool {
        self.processed_texts.contains(text)
    }

    pub fn record_text(&mut self, text: impl Into<String>) {
        self.processed_texts.insert(text.into());
    }

    /// Record `node` and its text as emitted in one step.
    pub fn record_emitted(&mut self, node: N, text: impl Into<String>) {
        self.mark_processed(node);
        self.record_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_ids_are_unique_and_single_use() {
        let mut registry: MarkerRegistry<u32> = MarkerRegistry::default();
        let a = registry.register(MarkerEntry {
            source: Some(1),
            anchor_text: None,
            kind: MarkerKind::Associated,
        });
        let b = registry.register(MarkerEntry {
            source: None,
            anchor_text: Some("Pricing".into()),
            kind: MarkerKind::Heading,
        });
        assert_ne!(a, b);
        assert_eq!(registry.issued(), 2);

        assert!(registry.take(a).is_some());
        assert!(registry.take(a).is_none());
        assert_eq!(registry.pending(), 1);
    }

    #[test]
    fn test_marker_token_format() {
        assert_eq!(marker_token(7), "[TABLE_MARKER:7]");
    }

    #[test]
    fn test_context_tracks_nodes_and_texts_separately() {
        let mut ctx: ExtractionContext<u32> = ExtractionContext::new();
        ctx.record_emitted(3, "Hello world");
        assert!(ctx.is_processed(3));
        assert!(!ctx.is_processed(4));
        assert!(ctx.has_text("Hello world"));
        assert!(!ctx.has_text("hello world"));
    }
}
