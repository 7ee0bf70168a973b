//! `wry`-backed script runtime.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::warn;
use wry::WebView;

use richview_common::BridgeError;

use crate::channel::{CallId, ResultSink, ScriptRuntime};

/// Routes command-channel submissions into a `wry::WebView`.
///
/// Built before the webview exists (the channel needs a runtime up front,
/// the webview needs the channel's handlers); the webview is attached once
/// the builder has produced it. A submission racing the attach completes
/// with an error outcome, which the channel degrades to an empty result.
pub struct WryRuntime {
    webview: RefCell<Option<WebView>>,
}

impl WryRuntime {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            webview: RefCell::new(None),
        })
    }

    pub(crate) fn attach(&self, webview: WebView) {
        *self.webview.borrow_mut() = Some(webview);
    }

    /// Run `f` against the underlying webview, if attached.
    pub(crate) fn with_webview<T>(
        &self,
        f: impl FnOnce(&WebView) -> Result<T, wry::Error>,
    ) -> richview_common::Result<T> {
        match &*self.webview.borrow() {
            Some(webview) => f(webview).map_err(|e| BridgeError::WebView(e.to_string())),
            None => Err(BridgeError::WebView("webview not attached".into())),
        }
    }
}

impl ScriptRuntime for WryRuntime {
    fn submit(&self, id: CallId, script: &str, sink: ResultSink) {
        let Some(webview) = &*self.webview.borrow() else {
            warn!(id, "script submitted before webview attach");
            sink.lock()
                .unwrap()
                .push((id, Err("webview not attached".into())));
            return;
        };

        let result_sink = Arc::clone(&sink);
        let outcome = webview.evaluate_script_with_callback(script, move |raw| {
            result_sink.lock().unwrap().push((id, Ok(raw)));
        });
        if let Err(e) = outcome {
            sink.lock().unwrap().push((id, Err(e.to_string())));
        }
    }
}
