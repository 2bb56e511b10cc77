//! Page to readable-text translation pipeline
//!
//! A translation runs these stages over one document:
//! 1. Navigation: brand, header links and calls-to-action
//! 2. Heading walk: body content in document order, with table-related
//!    nodes deferred as markers
//! 3. Table extraction: the four-strategy waterfall over the whole document
//! 4. Marker resolution: each marker claims at most one pooled table
//! 5. Assembly: navigation, body, footer and the sparse-page fallback
//!
//! All bookkeeping lives in an [`ExtractionContext`] created per call, so
//! translations never share state.
//!
//! ```rust
//! # use kodegen_tools_readable::{ReadableConfig, translate_html};
//! let html = "<html><body><h1>Title</h1><p>Some body text for the page.</p></body></html>";
//! let text = translate_html(html, &ReadableConfig::default())?;
//! assert!(text.contains("# Title"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use std::sync::Arc;

pub mod assembler;
pub mod context;
pub mod heading_walker;
pub mod marker_resolver;
pub mod navigation;
pub mod tables;
pub mod text_normalizer;

pub use assembler::{AssemblyParts, assemble, extract_fallback_content, extract_footer_links};
pub use context::{ExtractionContext, MarkerEntry, MarkerKind, MarkerRegistry, OutputLine, marker_token};
pub use heading_walker::walk_headings;
pub use marker_resolver::{ResolvedContent, resolve_markers};
pub use navigation::{NavigationData, extract_navigation};
pub use tables::{TableCandidate, TablePool, TableStrategy, extract_tables, is_table_related};
pub use text_normalizer::{clean_text, extract_text_with_links};

use crate::config::ReadableConfig;
use crate::document::{DocumentModel, HtmlDocument};

/// Translate an already parsed document.
///
/// Never fails: per-node problems are logged and skipped inside each stage.
pub fn translate_document<D: DocumentModel>(doc: &D, config: &ReadableConfig) -> String {
    let mut ctx = ExtractionContext::new();

    let navigation = extract_navigation(doc, config);
    let body = walk_headings(doc, &mut ctx, config);
    let mut pool = extract_tables(doc, config);
    let pooled = pool.len();
    let content = resolve_markers(body, &mut ctx.markers, &mut pool);

    let footer = extract_footer_links(doc, config.max_footer_links()).unwrap_or_else(|e| {
        tracing::warn!("Footer extraction failed: {}", e);
        Vec::new()
    });

    tracing::debug!(
        "Translated page: {} table(s) pooled, {} marker(s) resolved, {} unresolved",
        pooled,
        content.resolved,
        content.unresolved
    );

    assemble(
        doc,
        &mut ctx,
        AssemblyParts {
            navigation,
            content,
            footer,
        },
        config,
    )
}

/// Parse and translate raw HTML.
///
/// Relative links resolve against the configured base URL.
///
/// # Errors
///
/// Returns an error if the input exceeds the configured size limit.
pub fn translate_html(html: &str, config: &ReadableConfig) -> Result<String> {
    if html.len() > config.max_html_bytes() {
        anyhow::bail!(
            "HTML input too large: {} bytes (max: {} bytes)",
            html.len(),
            config.max_html_bytes()
        );
    }

    let doc = HtmlDocument::parse(html, config.parsed_base_url());
    Ok(translate_document(&doc, config))
}

/// Translate raw HTML on the blocking thread pool.
///
/// # Errors
///
/// Returns an error if the input is too large or the translation task panics.
pub async fn translate_html_async(html: &str, config: &ReadableConfig) -> Result<String> {
    let html = Arc::<str>::from(html);
    let config = config.clone();

    tokio::task::spawn_blocking(move || translate_html(&html, &config))
        .await
        .map_err(|e| anyhow::anyhow!("Page translation task panicked: {}", e))?
}
