use std::sync::Arc;

use crate::content::AssetCatalog;
use crate::editor::EditorCallbacks;

/// Configuration for creating a rich text view.
pub struct ViewConfig {
    /// Load the read-only viewer document instead of the editor.
    pub read_only: bool,
    /// Whether the webview background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Host callback slots, each independently optional.
    pub callbacks: EditorCallbacks,
    /// Opens an activated link outside the view (external browser).
    /// Returns `true` when it handled the URL; the in-view navigation is
    /// then cancelled. Consulted synchronously from the navigation
    /// handler, hence the separate slot and the `Send + Sync` bound.
    pub link_opener: Option<Arc<dyn Fn(&str) -> bool + Send + Sync>>,
    /// Bundled assets plus any host overrides (custom stylesheet etc.).
    pub assets: AssetCatalog,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            transparent: true,
            devtools: cfg!(debug_assertions),
            callbacks: EditorCallbacks::default(),
            link_opener: None,
            assets: AssetCatalog::new(),
        }
    }
}

impl ViewConfig {
    /// Config for an editable view.
    pub fn editor(callbacks: EditorCallbacks) -> Self {
        Self {
            callbacks,
            ..Default::default()
        }
    }

    /// Config for a read-only viewer.
    pub fn viewer(callbacks: EditorCallbacks) -> Self {
        Self {
            read_only: true,
            callbacks,
            ..Default::default()
        }
    }
}
