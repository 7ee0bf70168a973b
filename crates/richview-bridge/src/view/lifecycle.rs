use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{self, AssetCatalog};
use crate::dispatcher::{decide_navigation, NavigationPolicy, SignalLatch};
use crate::editor::EditorBridge;
use crate::script;

use super::types::ViewConfig;
use super::RichTextView;
use super::runtime::WryRuntime;

impl RichTextView {
    /// Create a view as a child of the given window.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// The view loads the bundled editor or viewer document and starts
    /// Unloaded; the host should call [`RichTextView::pump`] every
    /// event-loop tick to deliver results and content events.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: ViewConfig,
    ) -> Result<RichTextView, wry::Error> {
        let runtime = WryRuntime::new();
        let bridge = EditorBridge::new(runtime.clone(), config.callbacks);
        let signals = bridge.signals();
        let assets = Arc::new(config.assets);

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_focused(false);

        builder = Self::attach_ipc_handler(builder, signals.clone());
        builder = Self::attach_navigation_handler(builder, signals, config.link_opener);
        builder = Self::attach_custom_protocol(builder, assets);

        let url = content::page_url(config.read_only);
        builder = builder.with_url(&url);

        let webview = builder.build_as_child(window)?;
        runtime.attach(webview);

        debug!(read_only = config.read_only, url = %url, "rich text view created");

        Ok(RichTextView { bridge, runtime })
    }

    /// IPC doorbell: the bridge script posts `"drain"` after each enqueue.
    fn attach_ipc_handler(
        builder: WebViewBuilder<'_>,
        signals: SignalLatch,
    ) -> WebViewBuilder<'_> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().as_str();
            if body == script::DRAIN_SIGNAL {
                signals.arm();
            } else {
                warn!(body_len = body.len(), "unexpected IPC message ignored");
            }
        })
    }

    /// Navigation policy: cancel the reserved callback marker (arming a
    /// drain), hand activated web links to the host's opener, let
    /// everything else through.
    fn attach_navigation_handler(
        builder: WebViewBuilder<'_>,
        signals: SignalLatch,
        link_opener: Option<Arc<dyn Fn(&str) -> bool + Send + Sync>>,
    ) -> WebViewBuilder<'_> {
        builder.with_navigation_handler(move |url| match decide_navigation(&url) {
            NavigationPolicy::DrainSignal => {
                signals.arm();
                false
            }
            NavigationPolicy::OpenExternal => {
                if let Some(open) = &link_opener {
                    if open(&url) {
                        debug!(url = %url, "link opened by host");
                        return false;
                    }
                }
                debug!(url = %url, "link not handled by host, default handling");
                true
            }
            NavigationPolicy::Allow => true,
        })
    }

    fn attach_custom_protocol(
        builder: WebViewBuilder<'_>,
        assets: Arc<AssetCatalog>,
    ) -> WebViewBuilder<'_> {
        builder.with_custom_protocol(content::SCHEME.to_string(), move |_wv_id, request| {
            let uri = request.uri().to_string();
            let path = uri
                .strip_prefix("richview://localhost/")
                .or_else(|| uri.strip_prefix("richview://localhost"))
                .or_else(|| uri.strip_prefix("richview:///"))
                .or_else(|| uri.strip_prefix("richview://"))
                .unwrap_or("");

            match assets.resolve(path) {
                Some((mime, data)) => wry::http::Response::builder()
                    .status(200)
                    .header("Content-Type", mime.as_ref())
                    .body(Cow::from(data.into_owned()))
                    .unwrap(),
                None => {
                    warn!(path = %path, "custom protocol: asset not found");
                    wry::http::Response::builder()
                        .status(404)
                        .body(Cow::from(b"Not Found".to_vec()))
                        .unwrap()
                }
            }
        })
    }
}
