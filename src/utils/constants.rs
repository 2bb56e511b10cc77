//! Shared configuration constants for the readable view
//!
//! Default caps and limits used by `ReadableConfig` and the extraction stages.
//! Caps keep the flattened page short enough to read; none of them are
//! correctness bounds.

/// Navigation links kept from header/nav containers
pub const DEFAULT_MAX_NAV_LINKS: usize = 10;

/// Call-to-action buttons kept across all CTA selectors
pub const DEFAULT_MAX_CTAS: usize = 3;

/// Footer links kept
pub const DEFAULT_MAX_FOOTER_LINKS: usize = 20;

/// Content items (paragraphs, lists, table markers) gathered under one heading
pub const DEFAULT_MAX_ASSOCIATED_ITEMS: usize = 5;

/// Data rows taken from a structural `<table>` after its header row
pub const DEFAULT_MAX_STRUCTURAL_ROWS: usize = 14;

/// Data rows taken from a custom div table after its header row
pub const DEFAULT_MAX_CUSTOM_ROWS: usize = 15;

/// Custom div tables accepted per page
pub const DEFAULT_MAX_CUSTOM_TABLES: usize = 10;

/// Visible text snippets appended by the low-content fallback
pub const DEFAULT_MAX_FALLBACK_ITEMS: usize = 10;

/// Assembled item count under which the low-content fallback runs
pub const DEFAULT_MIN_CONTENT_ITEMS: usize = 5;

/// How long `enable` waits for the page to report that loading finished
pub const DEFAULT_DYNAMIC_CONTENT_TIMEOUT_MS: u64 = 2_000;

/// Maximum HTML input size (10 MB)
///
/// Same ceiling the markdown converter applies before parsing; real pages sit
/// far below it.
pub const DEFAULT_MAX_HTML_BYTES: usize = 10 * 1024 * 1024;
