//! Editor bridge: native-side state, host callbacks, and the public
//! operation surface shared by the editor and viewer widgets.

use std::rc::Rc;

use crate::channel::{CommandChannel, ScriptRuntime, ScriptValue};
use crate::dispatcher::SignalLatch;
use crate::script;

pub(crate) mod interpreter;

/// Load status of the content document. `Unloaded` → `Loaded` happens
/// exactly once, on the first `ready` event from the bridge script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Unloaded,
    Loaded,
}

/// Content state captured before the document finished loading, flushed
/// in field order on the first `ready` event.
#[derive(Debug, Default)]
pub(crate) struct InitialContent {
    pub html: Option<String>,
    pub placeholder: Option<String>,
    pub line_height: Option<u32>,
}

/// Host callback slots. Each is independently optional; an unset slot
/// simply means the host does not care about that notification.
#[derive(Default)]
pub struct EditorCallbacks {
    /// The document content changed through user input. The refreshed HTML
    /// is passed along; an empty string is a valid, distinct value (the
    /// host typically shows its placeholder then).
    pub on_content_changed: Option<Box<dyn Fn(&str)>>,
    /// The measured content height changed. Fires only on an actual
    /// change, never for a repeated identical measurement.
    pub on_height_changed: Option<Box<dyn Fn(i64)>>,
    /// A named custom action was invoked from the content side.
    pub on_custom_action: Option<Box<dyn Fn(&str)>>,
}

/// Native-side mirror of the content state. All fields are last-write-wins
/// and only ever updated by explicit setters or synchronization
/// round-trips, never inferred.
pub struct EditorCore {
    pub(crate) state: EditorState,
    pub(crate) content_html: String,
    pub(crate) height: i64,
    pub(crate) line_height: u32,
    pub(crate) placeholder: String,
    pub(crate) initial: InitialContent,
    pub(crate) callbacks: EditorCallbacks,
}

impl EditorCore {
    pub fn new(callbacks: EditorCallbacks) -> Self {
        Self {
            state: EditorState::Unloaded,
            content_html: String::new(),
            height: 0,
            line_height: script::DEFAULT_LINE_HEIGHT,
            placeholder: String::new(),
            initial: InitialContent::default(),
            callbacks,
        }
    }
}

/// The bridge between a host widget and one embedded content document.
///
/// All methods must be called from the thread that owns the widget; the
/// host drives completion delivery by calling [`EditorBridge::pump`] every
/// event-loop tick.
pub struct EditorBridge {
    core: EditorCore,
    channel: CommandChannel,
    signals: SignalLatch,
}

impl EditorBridge {
    pub fn new(runtime: Rc<dyn ScriptRuntime>, callbacks: EditorCallbacks) -> Self {
        Self {
            core: EditorCore::new(callbacks),
            channel: CommandChannel::new(runtime),
            signals: SignalLatch::new(),
        }
    }

    /// The latch the webview handlers arm when the content runtime signals
    /// a non-empty event queue.
    pub fn signals(&self) -> SignalLatch {
        self.signals.clone()
    }

    /// Process completed script calls and armed drain signals until both
    /// are quiescent. Continuations and host callbacks run inside this
    /// call, on the calling thread.
    pub fn pump(&mut self) {
        loop {
            let ready = self.channel.take_ready();
            let drains = self.signals.take();
            if ready.is_empty() && drains == 0 {
                break;
            }
            for (complete, value) in ready {
                complete(&mut self.core, &mut self.channel, value);
            }
            for _ in 0..drains {
                interpreter::begin_drain(&mut self.channel);
            }
        }
    }

    // -- cached state --

    /// Last known document HTML. Refreshed on `input` events and content
    /// setters; an explicit round-trip is [`EditorBridge::get_content`].
    pub fn content(&self) -> &str {
        &self.core.content_html
    }

    /// Last measured content height, in CSS pixels.
    pub fn height(&self) -> i64 {
        self.core.height
    }

    pub fn line_height(&self) -> u32 {
        self.core.line_height
    }

    pub fn placeholder(&self) -> &str {
        &self.core.placeholder
    }

    pub fn state(&self) -> EditorState {
        self.core.state
    }

    pub fn is_loaded(&self) -> bool {
        self.core.state == EditorState::Loaded
    }

    // -- content operations --

    /// Replace the displayed document. Before the document has loaded the
    /// value is buffered and applied on the first `ready` event; afterwards
    /// it applies immediately and triggers a height recomputation.
    pub fn set_content(&mut self, html: &str) {
        match self.core.state {
            EditorState::Loaded => {
                interpreter::apply_content(&mut self.core, &mut self.channel, html)
            }
            EditorState::Unloaded => self.core.initial.html = Some(html.to_owned()),
        }
    }

    /// Fetch the current document HTML from the content runtime.
    pub fn get_content(&mut self, handler: impl FnOnce(String) + 'static) {
        self.channel.execute(
            script::GET_HTML,
            Box::new(move |_, _, value| handler(value.as_text())),
        );
    }

    /// Fetch the plain-text rendering of the document.
    pub fn get_plain_text(&mut self, handler: impl FnOnce(String) + 'static) {
        self.channel.execute(
            script::GET_TEXT,
            Box::new(move |_, _, value| handler(value.as_text())),
        );
    }

    /// Set the placeholder shown while the document is empty. Buffered
    /// until loaded, applied immediately afterwards.
    pub fn set_placeholder(&mut self, text: &str) {
        match self.core.state {
            EditorState::Loaded => {
                interpreter::apply_placeholder(&mut self.core, &mut self.channel, text)
            }
            EditorState::Unloaded => self.core.initial.placeholder = Some(text.to_owned()),
        }
    }

    /// Set the content line height in pixels. Buffered until loaded,
    /// applied immediately afterwards.
    pub fn set_line_height(&mut self, px: u32) {
        match self.core.state {
            EditorState::Loaded => {
                interpreter::apply_line_height(&mut self.core, &mut self.channel, px)
            }
            EditorState::Unloaded => self.core.initial.line_height = Some(px),
        }
    }

    /// Set the content font size in pixels. Not part of the buffered
    /// initial state: before the document loads this is a silent no-op.
    pub fn set_font_size(&mut self, px: u32) {
        if self.core.state == EditorState::Loaded {
            self.channel
                .execute(script::set_font_size(px), Box::new(|_, _, _| {}));
        }
    }

    // -- selection --

    /// Whether the current selection is a range (not a caret).
    pub fn has_range_selection(&mut self, handler: impl FnOnce(bool) + 'static) {
        self.channel.execute(
            script::RANGE_SELECTION_EXISTS,
            Box::new(move |_, _, value| handler(value.as_bool())),
        );
    }

    /// The href under the current range selection, or `None` when there is
    /// no range selection or the selection carries no link.
    pub fn selected_href(&mut self, handler: impl FnOnce(Option<String>) + 'static) {
        self.channel.execute(
            script::RANGE_SELECTION_EXISTS,
            Box::new(move |_, channel, value| {
                if !value.as_bool() {
                    handler(None);
                    return;
                }
                channel.execute(
                    script::GET_SELECTED_HREF,
                    Box::new(move |_, _, value| {
                        let href = value.as_text();
                        handler(if href.is_empty() { None } else { Some(href) });
                    }),
                );
            }),
        );
    }

    // -- escape hatch --

    /// Run an arbitrary script in the content runtime. Engine failures
    /// resolve to [`ScriptValue::Empty`], never an error.
    pub fn run_command(&mut self, js: &str, handler: impl FnOnce(ScriptValue) + 'static) {
        self.channel
            .execute(js, Box::new(move |_, _, value| handler(value)));
    }
}
