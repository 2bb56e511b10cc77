//! Readable view controller
//!
//! Holds the only state that outlives a single translation: whether the
//! readable view is active, and the snapshot of the original page it replaced.
//! Toggling is idempotent in both directions.
//!
//! `enable` and `disable` take `&mut self`, so a second toggle cannot start
//! while an enable is still waiting for dynamic content; requests are handled
//! strictly one after another.

pub mod dynamic_content;
pub mod errors;
pub mod protocol;

pub use dynamic_content::{PageReceiver, PageState, WaitOutcome, page_channel, wait_for_dynamic_content};
pub use errors::ViewError;
pub use protocol::{ControlRequest, ControlResponse};

use crate::config::ReadableConfig;
use crate::page_translator::translate_html_async;
use std::sync::Arc;

/// The original page as it was when the readable view replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub html: Arc<str>,
}

pub struct ReadableView {
    config: ReadableConfig,
    page: PageReceiver,
    active: bool,
    snapshot: Option<PageSnapshot>,
    displayed: Arc<str>,
}

impl ReadableView {
    #[must_use]
    pub fn new(page: PageReceiver, config: ReadableConfig) -> Self {
        let displayed = Arc::clone(&page.borrow().html);
        Self {
            config,
            page,
            active: false,
            snapshot: None,
            displayed,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// What the page currently shows: the readable text while active,
    /// the original markup otherwise.
    #[must_use]
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&PageSnapshot> {
        self.snapshot.as_ref()
    }

    /// Switch to the readable view.
    ///
    /// Snapshots the page, waits for dynamic content (bounded by the
    /// configured timeout), then translates the latest markup. No-op when
    /// already active. On failure the view is left exactly as before.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Translation`] if the page cannot be translated.
    pub async fn enable(&mut self) -> Result<(), ViewError> {
        if self.active {
            tracing::debug!("Readable view already active");
            return Ok(());
        }

        self.active = true;
        self.snapshot = Some(PageSnapshot {
            html: Arc::clone(&self.displayed),
        });

        let outcome =
            wait_for_dynamic_content(&mut self.page, self.config.dynamic_content_timeout()).await;
        tracing::debug!("Dynamic content wait finished: {:?}", outcome);

        let html = Arc::clone(&self.page.borrow().html);
        match translate_html_async(&html, &self.config).await {
            Ok(text) => {
                self.displayed = Arc::from(text);
                tracing::info!("Readable view enabled");
                Ok(())
            }
            Err(e) => {
                self.active = false;
                self.snapshot = None;
                tracing::warn!("Readable view not enabled: {:#}", e);
                Err(ViewError::Translation(format!("{e:#}")))
            }
        }
    }

    /// Restore the original page. No-op when inactive.
    pub fn disable(&mut self) {
        if !self.active {
            return;
        }

        self.active = false;
        if let Some(snapshot) = self.snapshot.take() {
            self.displayed = snapshot.html;
        }
        tracing::info!("Readable view disabled");
    }

    /// Apply one control request and produce its response.
    pub async fn handle_request(&mut self, request: ControlRequest) -> ControlResponse {
        match request {
            ControlRequest::ToggleAiMode { enabled: true } => match self.enable().await {
                Ok(()) => ControlResponse::ok(),
                Err(e) => ControlResponse::failure(e.to_string()),
            },
            ControlRequest::ToggleAiMode { enabled: false } => {
                self.disable();
                ControlResponse::ok()
            }
        }
    }

    /// Decode one JSON control message, apply it, and encode the response.
    pub async fn handle_message(&mut self, message: &str) -> String {
        let response = match serde_json::from_str::<ControlRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => ControlResponse::failure(ViewError::InvalidRequest(e.to_string()).to_string()),
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            tracing::warn!("Failed to encode control response: {}", e);
            r#"{"success":false,"error":"response encoding failed"}"#.to_string()
        })
    }
}
