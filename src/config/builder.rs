//! Fluent builder for `ReadableConfig`
//!
//! Starts from defaults; `build()` validates the combination before handing
//! out a config, so downstream stages never see a zero cap or a bad base URL.

use anyhow::{Result, anyhow, bail};
use url::Url;

use super::types::ReadableConfig;

#[derive(Debug, Clone, Default)]
pub struct ReadableConfigBuilder {
    config: ReadableConfig,
}

impl From<ReadableConfig> for ReadableConfigBuilder {
    fn from(config: ReadableConfig) -> Self {
        Self { config }
    }
}

impl ReadableConfigBuilder {
    /// Set the page location used to resolve links
    ///
    /// # Example
    /// ```rust
    /// # use kodegen_tools_readable::config::ReadableConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = ReadableConfig::builder()
    ///     .base_url("https://example.com/pricing")
    ///     .build()?;
    /// assert_eq!(config.base_url(), Some("https://example.com/pricing"));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn section_dividers(mut self, enabled: bool) -> Self {
        self.config.section_dividers = enabled;
        self
    }

    #[must_use]
    pub fn max_nav_links(mut self, max: usize) -> Self {
        self.config.max_nav_links = max;
        self
    }

    #[must_use]
    pub fn max_ctas(mut self, max: usize) -> Self {
        self.config.max_ctas = max;
        self
    }

    #[must_use]
    pub fn max_footer_links(mut self, max: usize) -> Self {
        self.config.max_footer_links = max;
        self
    }

    #[must_use]
    pub fn max_associated_items(mut self, max: usize) -> Self {
        self.config.max_associated_items = max;
        self
    }

    #[must_use]
    pub fn max_structural_rows(mut self, max: usize) -> Self {
        self.config.max_structural_rows = max;
        self
    }

    #[must_use]
    pub fn max_custom_rows(mut self, max: usize) -> Self {
        self.config.max_custom_rows = max;
        self
    }

    #[must_use]
    pub fn max_custom_tables(mut self, max: usize) -> Self {
        self.config.max_custom_tables = max;
        self
    }

    #[must_use]
    pub fn max_fallback_items(mut self, max: usize) -> Self {
        self.config.max_fallback_items = max;
        self
    }

    #[must_use]
    pub fn min_content_items(mut self, min: usize) -> Self {
        self.config.min_content_items = min;
        self
    }

    /// Set the dynamic-content wait ceiling in milliseconds
    #[must_use]
    pub fn dynamic_content_timeout_ms(mut self, millis: u64) -> Self {
        self.config.dynamic_content_timeout_ms = millis;
        self
    }

    #[must_use]
    pub fn max_html_bytes(mut self, bytes: usize) -> Self {
        self.config.max_html_bytes = bytes;
        self
    }

    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse as an absolute URL, if
    /// any output cap is zero, or if the timeout or size limit is zero.
    pub fn build(self) -> Result<ReadableConfig> {
        let config = self.config;

        if let Some(raw) = config.base_url.as_deref() {
            Url::parse(raw).map_err(|e| anyhow!("Invalid base_url '{raw}': {e}"))?;
        }

        let caps = [
            ("max_nav_links", config.max_nav_links),
            ("max_ctas", config.max_ctas),
            ("max_footer_links", config.max_footer_links),
            ("max_associated_items", config.max_associated_items),
            ("max_structural_rows", config.max_structural_rows),
            ("max_custom_rows", config.max_custom_rows),
            ("max_custom_tables", config.max_custom_tables),
            ("max_fallback_items", config.max_fallback_items),
            ("max_html_bytes", config.max_html_bytes),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, value)| *value == 0) {
            bail!("{name} must be greater than zero");
        }

        if config.dynamic_content_timeout_ms == 0 {
            bail!("dynamic_content_timeout_ms must be greater than zero");
        }

        Ok(config)
    }
}
