//! Bundled content serving via custom protocol.
//!
//! The editor and viewer pages plus the bridge script are compiled into
//! the crate and served over `richview://` so the webview needs neither a
//! local HTTP server nor filesystem access. Hosts can layer in-memory
//! overrides on top (a custom stylesheet, a themed page).

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// Custom protocol scheme the views load their assets from.
pub const SCHEME: &str = "richview";

pub const EDITOR_PAGE: &str = "editor/index.html";
pub const VIEWER_PAGE: &str = "viewer/index.html";
pub const BRIDGE_SCRIPT: &str = "bridge.js";

/// URL of the page a view should load.
pub fn page_url(read_only: bool) -> String {
    let page = if read_only { VIEWER_PAGE } else { EDITOR_PAGE };
    format!("{SCHEME}://localhost/{page}")
}

fn builtin(path: &str) -> Option<(&'static str, &'static [u8])> {
    match path {
        EDITOR_PAGE => Some(("text/html", include_bytes!("../assets/editor.html"))),
        VIEWER_PAGE => Some(("text/html", include_bytes!("../assets/viewer.html"))),
        BRIDGE_SCRIPT => Some((
            "application/javascript",
            include_bytes!("../assets/bridge.js"),
        )),
        _ => None,
    }
}

/// Serves the embedded assets, with optional in-memory overrides.
#[derive(Default)]
pub struct AssetCatalog {
    overrides: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-memory asset. Overrides shadow the embedded assets;
    /// the MIME type is inferred from the path extension.
    pub fn add_override(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        let path = path.into();
        let mime = mime_from_extension(Path::new(&path)).to_string();
        self.overrides.insert(path, (mime, data.into()));
    }

    /// Resolve a request path to content bytes and MIME type.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.trim_start_matches('/');

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        builtin(clean).map(|(mime, data)| (Cow::Borrowed(mime), Cow::Borrowed(data)))
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
