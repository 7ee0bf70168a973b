//! Bridge dispatcher: navigation policy and drain plumbing.
//!
//! The content runtime signals "my event queue is non-empty" through the
//! webview's IPC channel (or, as a fallback, by navigating to a reserved
//! unrouteable marker). Both paths arm the [`SignalLatch`]; the next pump
//! drains the queue through the command channel and feeds each parsed
//! event to the interpreter in enqueue order.

use std::sync::{Arc, Mutex};

use tracing::warn;

use richview_common::BridgeError;

use crate::script::RESERVED_CALLBACK_PREFIX;

// =============================================================================
// NAVIGATION POLICY
// =============================================================================

/// URL prefixes that are always allowed to load in the view itself:
/// the bundled-asset protocol (plus the WebView2 rewrite of it) and the
/// default empty page.
pub const INTERNAL_NAV_PREFIXES: &[&str] = &[
    "richview://",
    // On Windows, WebView2 rewrites custom protocols: richview://localhost/… → http://richview.localhost/…
    "http://richview.localhost",
    "about:blank",
];

/// What to do with a navigation attempt originating in the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Reserved callback marker: cancel the navigation and drain the
    /// content-side event queue.
    DrainSignal,
    /// A web link the user activated: offer it to the host's link opener.
    /// If the host opens it (external browser), cancel the in-view
    /// navigation; otherwise let default handling proceed.
    OpenExternal,
    /// Everything else passes through unmodified.
    Allow,
}

/// Classify a navigation attempt. Checked before the webview commits it.
pub fn decide_navigation(url: &str) -> NavigationPolicy {
    if url.starts_with(RESERVED_CALLBACK_PREFIX) {
        return NavigationPolicy::DrainSignal;
    }
    if INTERNAL_NAV_PREFIXES.iter().any(|p| url.starts_with(p)) {
        return NavigationPolicy::Allow;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return NavigationPolicy::OpenExternal;
    }
    NavigationPolicy::Allow
}

// =============================================================================
// DRAIN PAYLOAD
// =============================================================================

/// Parse the drained queue payload: a JSON array of event-name strings.
pub fn parse_queue_payload(payload: &str) -> richview_common::Result<Vec<String>> {
    serde_json::from_str::<Vec<String>>(payload)
        .map_err(|e| BridgeError::MalformedQueuePayload(e.to_string()))
}

/// Parse the drained payload, degrading a malformed payload to zero events
/// with a log line. There is no retry: the content runtime only re-signals
/// on the next enqueue.
pub fn parse_queue_payload_lossy(payload: &str) -> Vec<String> {
    match parse_queue_payload(payload) {
        Ok(names) => names,
        Err(err) => {
            warn!(%err, payload_len = payload.len(), "dropping drained events");
            Vec::new()
        }
    }
}

// =============================================================================
// SIGNAL LATCH
// =============================================================================

/// Counts drain signals armed by the webview handlers until the owning
/// thread consumes them. Signals never coalesce: two enqueue-side signals
/// mean two drains (the second harmlessly finds an empty queue).
#[derive(Clone, Default)]
pub struct SignalLatch {
    armed: Arc<Mutex<usize>>,
}

impl SignalLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm one drain. Callable from any webview handler.
    pub fn arm(&self) {
        *self.armed.lock().unwrap() += 1;
    }

    /// Take the number of drains owed since the last call.
    pub fn take(&self) -> usize {
        let mut armed = self.armed.lock().unwrap();
        std::mem::take(&mut *armed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
