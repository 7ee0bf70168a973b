//! Rich-text editor and viewer widgets over an embedded webview.
//!
//! Wraps the `wry` crate to provide:
//! - A command channel: run script in the content document, results come
//!   back asynchronously with exactly-once delivery
//! - An ordered content→native event queue, drained on signal
//! - Navigation policy (reserved callback marker, external link opening)
//! - Editor state (load gating, cached content/height mirrors) and host
//!   callbacks (content changed, height changed, custom actions)
//! - Bundled editor/viewer documents served over a custom protocol

pub mod channel;
pub mod content;
pub mod dispatcher;
pub mod editor;
pub mod script;
pub mod view;

#[cfg(test)]
pub(crate) mod testutil;

pub use channel::{CommandChannel, ScriptRuntime, ScriptValue};
pub use dispatcher::{decide_navigation, NavigationPolicy, SignalLatch};
pub use editor::{EditorBridge, EditorCallbacks, EditorState};
pub use view::{RichTextView, ViewConfig, ViewId, ViewRegistry};

pub use richview_common::{BridgeError, EditorEvent};
