//! Core configuration types for the readable view
//!
//! This module contains the `ReadableConfig` struct that controls the caps,
//! layout options and timeouts of a page translation.

use crate::utils::{
    DEFAULT_DYNAMIC_CONTENT_TIMEOUT_MS, DEFAULT_MAX_ASSOCIATED_ITEMS, DEFAULT_MAX_CTAS,
    DEFAULT_MAX_CUSTOM_ROWS, DEFAULT_MAX_CUSTOM_TABLES, DEFAULT_MAX_FALLBACK_ITEMS,
    DEFAULT_MAX_FOOTER_LINKS, DEFAULT_MAX_HTML_BYTES, DEFAULT_MAX_NAV_LINKS,
    DEFAULT_MAX_STRUCTURAL_ROWS, DEFAULT_MIN_CONTENT_ITEMS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration struct for page translation
///
/// Every field has a default, so partial JSON files are accepted:
///
/// ```json
/// { "base_url": "https://example.com/", "section_dividers": true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadableConfig {
    /// Location the page was loaded from.
    ///
    /// Used to resolve relative links and to tell same-origin links from
    /// cross-origin ones.
    pub(crate) base_url: Option<String>,

    /// Emit `<div class="section-divider">` markers between output sections
    pub(crate) section_dividers: bool,

    pub(crate) max_nav_links: usize,
    pub(crate) max_ctas: usize,
    pub(crate) max_footer_links: usize,
    pub(crate) max_associated_items: usize,
    pub(crate) max_structural_rows: usize,
    pub(crate) max_custom_rows: usize,
    pub(crate) max_custom_tables: usize,
    pub(crate) max_fallback_items: usize,

    /// Assembled item count under which the visible-text fallback runs
    pub(crate) min_content_items: usize,

    /// Upper bound on the wait for dynamic content before translating
    pub(crate) dynamic_content_timeout_ms: u64,

    /// Inputs larger than this are rejected before parsing
    pub(crate) max_html_bytes: usize,
}

impl Default for ReadableConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            section_dividers: false,
            max_nav_links: DEFAULT_MAX_NAV_LINKS,
            max_ctas: DEFAULT_MAX_CTAS,
            max_footer_links: DEFAULT_MAX_FOOTER_LINKS,
            max_associated_items: DEFAULT_MAX_ASSOCIATED_ITEMS,
            max_structural_rows: DEFAULT_MAX_STRUCTURAL_ROWS,
            max_custom_rows: DEFAULT_MAX_CUSTOM_ROWS,
            max_custom_tables: DEFAULT_MAX_CUSTOM_TABLES,
            max_fallback_items: DEFAULT_MAX_FALLBACK_ITEMS,
            min_content_items: DEFAULT_MIN_CONTENT_ITEMS,
            dynamic_content_timeout_ms: DEFAULT_DYNAMIC_CONTENT_TIMEOUT_MS,
            max_html_bytes: DEFAULT_MAX_HTML_BYTES,
        }
    }
}

impl ReadableConfig {
    /// Start building a configuration from defaults
    #[must_use]
    pub fn builder() -> super::ReadableConfigBuilder {
        super::ReadableConfigBuilder::default()
    }

    /// Load a configuration from a JSON file and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails the same validation as [`super::ReadableConfigBuilder::build`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config JSON in {}", path.display()))?;
        super::ReadableConfigBuilder::from(config).build()
    }
}
