//! Getter methods for `ReadableConfig`

use std::time::Duration;
use url::Url;

use super::types::ReadableConfig;

impl ReadableConfig {
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Parsed base URL; `None` when unset.
    ///
    /// The builder validates the URL, so a stored value always parses.
    #[must_use]
    pub fn parsed_base_url(&self) -> Option<Url> {
        self.base_url.as_deref().and_then(|raw| Url::parse(raw).ok())
    }

    #[must_use]
    pub fn section_dividers(&self) -> bool {
        self.section_dividers
    }

    #[must_use]
    pub fn max_nav_links(&self) -> usize {
        self.max_nav_links
    }

    #[must_use]
    pub fn max_ctas(&self) -> usize {
        self.max_ctas
    }

    #[must_use]
    pub fn max_footer_links(&self) -> usize {
        self.max_footer_links
    }

    #[must_use]
    pub fn max_associated_items(&self) -> usize {
        self.max_associated_items
    }

    #[must_use]
    pub fn max_structural_rows(&self) -> usize {
        self.max_structural_rows
    }

    #[must_use]
    pub fn max_custom_rows(&self) -> usize {
        self.max_custom_rows
    }

    #[must_use]
    pub fn max_custom_tables(&self) -> usize {
        self.max_custom_tables
    }

    #[must_use]
    pub fn max_fallback_items(&self) -> usize {
        self.max_fallback_items
    }

    #[must_use]
    pub fn min_content_items(&self) -> usize {
        self.min_content_items
    }

    #[must_use]
    pub fn dynamic_content_timeout(&self) -> Duration {
        Duration::from_millis(self.dynamic_content_timeout_ms)
    }

    #[must_use]
    pub fn max_html_bytes(&self) -> usize {
        self.max_html_bytes
    }
}
