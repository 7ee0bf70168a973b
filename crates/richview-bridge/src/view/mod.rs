//! Host-facing widgets: the editor view and read-only viewer over an
//! embedded `wry` webview.

use std::rc::Rc;

use crate::channel::ScriptValue;
use crate::editor::{EditorBridge, EditorState};

mod lifecycle;
mod registry;
mod runtime;
mod types;

pub use registry::{ViewId, ViewRegistry};
pub use runtime::WryRuntime;
pub use types::ViewConfig;

/// One rich text widget: an embedded webview showing the bundled editor
/// or viewer document, bridged to native state and callbacks.
///
/// Owned by the UI thread. All operations are asynchronous round-trips
/// into the content runtime; the host drives delivery by calling
/// [`RichTextView::pump`] every event-loop tick.
pub struct RichTextView {
    bridge: EditorBridge,
    runtime: Rc<WryRuntime>,
}

impl RichTextView {
    /// Process completed script calls and pending content events.
    pub fn pump(&mut self) {
        self.bridge.pump();
    }

    // -- cached state --

    pub fn content(&self) -> &str {
        self.bridge.content()
    }

    pub fn height(&self) -> i64 {
        self.bridge.height()
    }

    pub fn line_height(&self) -> u32 {
        self.bridge.line_height()
    }

    pub fn state(&self) -> EditorState {
        self.bridge.state()
    }

    pub fn is_loaded(&self) -> bool {
        self.bridge.is_loaded()
    }

    // -- content operations (see `EditorBridge` for the contracts) --

    pub fn set_content(&mut self, html: &str) {
        self.bridge.set_content(html);
    }

    pub fn get_content(&mut self, handler: impl FnOnce(String) + 'static) {
        self.bridge.get_content(handler);
    }

    pub fn get_plain_text(&mut self, handler: impl FnOnce(String) + 'static) {
        self.bridge.get_plain_text(handler);
    }

    pub fn set_placeholder(&mut self, text: &str) {
        self.bridge.set_placeholder(text);
    }

    pub fn set_line_height(&mut self, px: u32) {
        self.bridge.set_line_height(px);
    }

    pub fn set_font_size(&mut self, px: u32) {
        self.bridge.set_font_size(px);
    }

    pub fn has_range_selection(&mut self, handler: impl FnOnce(bool) + 'static) {
        self.bridge.has_range_selection(handler);
    }

    pub fn selected_href(&mut self, handler: impl FnOnce(Option<String>) + 'static) {
        self.bridge.selected_href(handler);
    }

    pub fn run_command(&mut self, js: &str, handler: impl FnOnce(ScriptValue) + 'static) {
        self.bridge.run_command(js, handler);
    }

    // -- widget plumbing --

    /// Set the view bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> richview_common::Result<()> {
        self.runtime.with_webview(|webview| webview.set_bounds(bounds))
    }

    /// Show or hide the view.
    pub fn set_visible(&self, visible: bool) -> richview_common::Result<()> {
        self.runtime.with_webview(|webview| webview.set_visible(visible))
    }

    /// Focus the view.
    pub fn focus(&self) -> richview_common::Result<()> {
        self.runtime.with_webview(|webview| webview.focus())
    }

    /// Open devtools (if enabled).
    pub fn open_devtools(&self) {
        let _ = self.runtime.with_webview(|webview| {
            webview.open_devtools();
            Ok(())
        });
    }
}
