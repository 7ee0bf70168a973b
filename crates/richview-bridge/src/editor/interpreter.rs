//! Event interpretation: maps drained content events to state transitions
//! and host callbacks.

use tracing::debug;

use richview_common::EditorEvent;

use crate::channel::CommandChannel;
use crate::dispatcher::parse_queue_payload_lossy;
use crate::script;

use super::{EditorCore, EditorState};

/// Drain the content-side event queue and interpret every drained event,
/// in enqueue order. A malformed payload yields zero events and is not
/// retried; the runtime re-signals on its next enqueue.
pub(crate) fn begin_drain(channel: &mut CommandChannel) {
    channel.execute(
        script::GET_QUEUE,
        Box::new(|core, channel, value| {
            for name in parse_queue_payload_lossy(&value.as_text()) {
                match EditorEvent::parse(&name) {
                    Some(event) => dispatch(core, channel, event),
                    None => debug!(name, "ignoring unknown content event"),
                }
            }
        }),
    );
}

pub(crate) fn dispatch(core: &mut EditorCore, channel: &mut CommandChannel, event: EditorEvent) {
    match event {
        EditorEvent::Ready => on_ready(core, channel),
        EditorEvent::Input => on_input(channel),
        EditorEvent::HeightChanged => request_height(channel),
        // Reserved extension points.
        EditorEvent::Focus | EditorEvent::Blur => {}
        EditorEvent::Action(name) => on_action(channel, name),
    }
}

/// First `ready` transitions to `Loaded` and flushes the buffered initial
/// state in a fixed order: content, placeholder, line height. A later
/// `ready` (the buffers are already taken) only re-measures the height.
fn on_ready(core: &mut EditorCore, channel: &mut CommandChannel) {
    if core.state == EditorState::Unloaded {
        core.state = EditorState::Loaded;
        let initial = std::mem::take(&mut core.initial);
        if let Some(html) = initial.html {
            apply_content(core, channel, &html);
        }
        if let Some(text) = initial.placeholder {
            apply_placeholder(core, channel, &text);
        }
        if let Some(px) = initial.line_height {
            apply_line_height(core, channel, px);
        }
    }
    request_height(channel);
}

/// User input: keep the caret visible, refresh the cached content, notify
/// the host, then re-measure the height.
fn on_input(channel: &mut CommandChannel) {
    channel.execute(script::SCROLL_CARET_TO_VISIBLE, Box::new(|_, _, _| {}));
    channel.execute(
        script::GET_HTML,
        Box::new(|core, channel, value| {
            core.content_html = value.as_text();
            if let Some(cb) = &core.callbacks.on_content_changed {
                cb(&core.content_html);
            }
            request_height(channel);
        }),
    );
}

/// Custom action: refresh the cached content, then forward the action
/// name to the host.
fn on_action(channel: &mut CommandChannel, name: String) {
    channel.execute(
        script::GET_HTML,
        Box::new(move |core, _, value| {
            core.content_html = value.as_text();
            notify_custom_action(core, &name);
        }),
    );
}

/// Forwarding of a custom action name to the host slot, kept as its own
/// step so it can be exercised directly.
pub(crate) fn notify_custom_action(core: &mut EditorCore, name: &str) {
    if let Some(cb) = &core.callbacks.on_custom_action {
        cb(name);
    }
}

/// Apply new document content and re-measure the height once applied.
pub(crate) fn apply_content(core: &mut EditorCore, channel: &mut CommandChannel, html: &str) {
    core.content_html = html.to_owned();
    channel.execute(
        script::set_html(html),
        Box::new(|_, channel, _| request_height(channel)),
    );
}

pub(crate) fn apply_placeholder(core: &mut EditorCore, channel: &mut CommandChannel, text: &str) {
    core.placeholder = text.to_owned();
    channel.execute(script::set_placeholder_text(text), Box::new(|_, _, _| {}));
}

pub(crate) fn apply_line_height(core: &mut EditorCore, channel: &mut CommandChannel, px: u32) {
    core.line_height = px;
    channel.execute(script::set_line_height(px), Box::new(|_, _, _| {}));
}

/// Re-measure the content element height; the host hears about it only
/// when the measurement actually differs from the cache.
pub(crate) fn request_height(channel: &mut CommandChannel) {
    channel.execute(
        script::GET_HEIGHT,
        Box::new(|core, _, value| {
            let height = value.as_int();
            if core.height != height {
                core.height = height;
                if let Some(cb) = &core.callbacks.on_height_changed {
                    cb(height);
                }
            }
        }),
    );
}
