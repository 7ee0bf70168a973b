use serde::{Deserialize, Serialize};

/// Prefix the content runtime prepends to custom action names.
pub const ACTION_PREFIX: &str = "action/";

/// An event reported by the content runtime, parsed once at the bridge
/// boundary from the raw event name drained out of the content-side queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditorEvent {
    /// The editor document finished loading and the bridge script is live.
    Ready,
    /// The user edited the document.
    Input,
    /// The content element height may have changed (image load, mutation).
    HeightChanged,
    /// The editor gained focus. Reserved extension point.
    Focus,
    /// The editor lost focus. Reserved extension point.
    Blur,
    /// A named custom action was invoked from the content side.
    Action(String),
}

impl EditorEvent {
    /// Parse a raw event name into a typed event.
    ///
    /// Matching is by string prefix, checked in a fixed priority order
    /// (first match wins). Names that match no known prefix yield `None`
    /// and are ignored by the dispatcher.
    pub fn parse(name: &str) -> Option<Self> {
        if name.starts_with("ready") {
            Some(Self::Ready)
        } else if name.starts_with("input") {
            Some(Self::Input)
        } else if name.starts_with("updateHeight") {
            Some(Self::HeightChanged)
        } else if name.starts_with("focus") {
            Some(Self::Focus)
        } else if name.starts_with("blur") {
            Some(Self::Blur)
        } else if let Some(suffix) = name.strip_prefix(ACTION_PREFIX) {
            Some(Self::Action(suffix.to_string()))
        } else {
            None
        }
    }
}
