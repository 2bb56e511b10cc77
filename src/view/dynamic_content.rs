//! Waiting for a page to finish loading before it is translated.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Latest markup of the page and whether it has finished loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub html: Arc<str>,
    pub loaded: bool,
}

/// Receiving side of a page feed.
pub type PageReceiver = watch::Receiver<PageState>;

/// Create a page feed. The host keeps the sender and publishes markup
/// updates and the load-complete flag through it.
#[must_use]
pub fn page_channel(html: impl Into<Arc<str>>, loaded: bool) -> (watch::Sender<PageState>, PageReceiver) {
    watch::channel(PageState {
        html: html.into(),
        loaded,
    })
}

/// How the wait for dynamic content ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The page had already finished loading.
    AlreadyLoaded,
    /// The page finished loading during the wait.
    Loaded,
    /// The timeout elapsed first.
    TimedOut,
    /// The host dropped the feed before loading finished.
    SignalClosed,
}

/// Wait until the page reports it has loaded, or until `timeout` elapses.
///
/// One-shot: resolves on the first of the two and never retries. Always
/// resolves; the outcome only says why.
pub async fn wait_for_dynamic_content(page: &mut PageReceiver, timeout: Duration) -> WaitOutcome {
    if page.borrow_and_update().loaded {
        return WaitOutcome::AlreadyLoaded;
    }

    match tokio::time::timeout(timeout, page.wait_for(|state| state.loaded)).await {
        Ok(Ok(_)) => WaitOutcome::Loaded,
        Ok(Err(_)) => WaitOutcome::SignalClosed,
        Err(_) => WaitOutcome::TimedOut,
    }
}
