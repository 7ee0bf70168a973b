//! Command channel: script execution round-trips into the content runtime.
//!
//! Every native→content request is a `PendingCall` with a unique id and a
//! boxed continuation. The engine reports raw outcomes into a shared sink
//! (its completion callback may be required to be `Send`); `take_ready`
//! pairs them back up with their continuations on the owning thread and
//! invokes each exactly once. Engine failures are logged and completed
//! with [`ScriptValue::Empty`] so callers only ever see the documented
//! empty/false/zero defaults.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use richview_common::BridgeError;

use crate::editor::EditorCore;

/// Identifies one in-flight script evaluation.
pub type CallId = u64;

/// Raw result of one evaluation: the engine's JSON-serialized value, or an
/// engine-level error message.
pub type RawOutcome = Result<String, String>;

/// Shared sink the engine glue pushes raw outcomes into.
pub type ResultSink = Arc<Mutex<Vec<(CallId, RawOutcome)>>>;

/// Continuation run when a call completes. Receives the editor state and
/// the channel itself so it can issue follow-up calls.
pub type Continuation = Box<dyn FnOnce(&mut EditorCore, &mut CommandChannel, ScriptValue)>;

/// The seam to the embedded engine: submits a script for evaluation and
/// eventually reports the outcome for `id` into `sink`.
pub trait ScriptRuntime {
    fn submit(&self, id: CallId, script: &str, sink: ResultSink);
}

/// Decoded result of a content-side evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Text(String),
    Bool(bool),
    Int(i64),
    /// No result, or the evaluation failed.
    Empty,
}

impl ScriptValue {
    /// Decode the engine's JSON-serialized result.
    ///
    /// Arrays and objects are kept as their JSON text: the content runtime
    /// returns structured data as a string anyway (the drain surface
    /// stringifies), so this only matters for ad-hoc `run_command` scripts.
    pub fn from_json(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Empty;
        }
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Null) => Self::Empty,
            Ok(serde_json::Value::Bool(b)) => Self::Bool(b),
            Ok(serde_json::Value::Number(n)) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Int(n.as_f64().unwrap_or(0.0) as i64),
            },
            Ok(serde_json::Value::String(s)) => Self::Text(s),
            Ok(other) => Self::Text(other.to_string()),
            Err(e) => {
                warn!(error = %e, raw_len = raw.len(), "undecodable script result");
                Self::Empty
            }
        }
    }

    /// The string result, or `""` for anything else.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            _ => String::new(),
        }
    }

    /// The boolean result, or `false` for anything else.
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// The integer result, or `0` for anything else.
    pub fn as_int(&self) -> i64 {
        match self {
            Self::Int(i) => *i,
            _ => 0,
        }
    }
}

/// A queued script-execution request. Destroyed once its result (success
/// or failure) has been delivered to the continuation.
struct PendingCall {
    script: String,
    complete: Continuation,
}

/// Executes scripts in the content runtime and routes results back to
/// their continuations, exactly once per call.
pub struct CommandChannel {
    runtime: Rc<dyn ScriptRuntime>,
    sink: ResultSink,
    pending: HashMap<CallId, PendingCall>,
    next_id: CallId,
}

impl CommandChannel {
    pub fn new(runtime: Rc<dyn ScriptRuntime>) -> Self {
        Self {
            runtime,
            sink: Arc::new(Mutex::new(Vec::new())),
            pending: HashMap::new(),
            next_id: 1,
        }
    }

    /// Submit a script for evaluation. The continuation fires exactly once,
    /// on the owning thread, when [`CommandChannel::take_ready`] is pumped
    /// after the engine reports the outcome. Callers must not assume
    /// synchronous completion.
    pub fn execute(&mut self, script: impl Into<String>, complete: Continuation) -> CallId {
        let script = script.into();
        let id = self.next_id;
        self.next_id += 1;
        self.runtime.submit(id, &script, Arc::clone(&self.sink));
        self.pending.insert(id, PendingCall { script, complete });
        id
    }

    /// Take all completed calls, in completion order, paired with their
    /// decoded values. Outcomes for unknown ids (a destroyed or already
    /// completed call) are dropped with a log line, never a crash.
    pub fn take_ready(&mut self) -> Vec<(Continuation, ScriptValue)> {
        let outcomes = {
            let mut sink = self.sink.lock().unwrap();
            std::mem::take(&mut *sink)
        };

        let mut ready = Vec::with_capacity(outcomes.len());
        for (id, outcome) in outcomes {
            let Some(call) = self.pending.remove(&id) else {
                debug!(id, "stale or duplicate completion dropped");
                continue;
            };
            let value = match outcome {
                Ok(raw) => ScriptValue::from_json(&raw),
                Err(message) => {
                    let err = BridgeError::ScriptExecution(message);
                    warn!(script = %call.script, %err, "substituting empty result");
                    ScriptValue::Empty
                }
            };
            ready.push((call.complete, value));
        }
        ready
    }

    /// Number of calls still awaiting a result.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorCallbacks, EditorCore};
    use crate::testutil::FakeRuntime;

    fn pump(core: &mut EditorCore, channel: &mut CommandChannel) {
        for (complete, value) in channel.take_ready() {
            complete(core, channel, value);
        }
    }

    // -- ScriptValue decoding --

    #[test]
    fn decodes_json_string() {
        assert_eq!(
            ScriptValue::from_json("\"<p>hi</p>\""),
            ScriptValue::Text("<p>hi</p>".into())
        );
    }

    #[test]
    fn decodes_bool_and_int() {
        assert_eq!(ScriptValue::from_json("true"), ScriptValue::Bool(true));
        assert_eq!(ScriptValue::from_json("false"), ScriptValue::Bool(false));
        assert_eq!(ScriptValue::from_json("412"), ScriptValue::Int(412));
    }

    #[test]
    fn decodes_null_and_empty_as_empty() {
        assert_eq!(ScriptValue::from_json("null"), ScriptValue::Empty);
        assert_eq!(ScriptValue::from_json(""), ScriptValue::Empty);
    }

    #[test]
    fn garbage_decodes_as_empty() {
        assert_eq!(ScriptValue::from_json("not json"), ScriptValue::Empty);
    }

    #[test]
    fn structured_values_keep_their_json_text() {
        assert_eq!(
            ScriptValue::from_json("[\"ready\"]"),
            ScriptValue::Text("[\"ready\"]".into())
        );
    }

    #[test]
    fn accessors_substitute_defaults() {
        assert_eq!(ScriptValue::Empty.as_text(), "");
        assert!(!ScriptValue::Empty.as_bool());
        assert_eq!(ScriptValue::Empty.as_int(), 0);
        assert_eq!(ScriptValue::Bool(true).as_int(), 0);
        assert_eq!(ScriptValue::Int(7).as_int(), 7);
    }

    // -- CommandChannel --

    #[test]
    fn continuation_fires_exactly_once_with_result() {
        let runtime = FakeRuntime::shared();
        let mut channel = CommandChannel::new(runtime.clone());
        let mut core = EditorCore::new(EditorCallbacks::default());

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        channel.execute(
            "RV.getHtml()",
            Box::new(move |_, _, value| sink.borrow_mut().push(value.as_text())),
        );
        assert_eq!(channel.in_flight(), 1);

        runtime.resolve_next("\"<b>hi</b>\"");
        pump(&mut core, &mut channel);

        assert_eq!(*seen.borrow(), vec!["<b>hi</b>".to_string()]);
        assert_eq!(channel.in_flight(), 0);
    }

    #[test]
    fn engine_failure_substitutes_empty() {
        let runtime = FakeRuntime::shared();
        let mut channel = CommandChannel::new(runtime.clone());
        let mut core = EditorCore::new(EditorCallbacks::default());

        let seen = std::rc::Rc::new(std::cell::Cell::new(None));
        let sink = seen.clone();
        channel.execute(
            "RV.getHeight()",
            Box::new(move |_, _, value| sink.set(Some(value))),
        );
        runtime.fail_next("TypeError: boom");
        pump(&mut core, &mut channel);

        assert_eq!(seen.take(), Some(ScriptValue::Empty));
    }

    #[test]
    fn overlapping_calls_resolve_independently() {
        let runtime = FakeRuntime::shared();
        let mut channel = CommandChannel::new(runtime.clone());
        let mut core = EditorCore::new(EditorCallbacks::default());

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        for _ in 0..2 {
            let sink = seen.clone();
            channel.execute(
                "RV.getHtml()",
                Box::new(move |_, _, value| sink.borrow_mut().push(value.as_text())),
            );
        }
        assert_eq!(channel.in_flight(), 2);

        // The runtime may answer out of order; each continuation still
        // fires exactly once with its own value.
        runtime.resolve_nth(1, "\"second\"");
        runtime.resolve_nth(0, "\"first\"");
        pump(&mut core, &mut channel);

        assert_eq!(
            *seen.borrow(),
            vec!["second".to_string(), "first".to_string()]
        );
        assert_eq!(channel.in_flight(), 0);
    }

    #[test]
    fn duplicate_completion_is_dropped() {
        let runtime = FakeRuntime::shared();
        let mut channel = CommandChannel::new(runtime.clone());
        let mut core = EditorCore::new(EditorCallbacks::default());

        let count = std::rc::Rc::new(std::cell::Cell::new(0u32));
        let sink = count.clone();
        channel.execute(
            "RV.getText()",
            Box::new(move |_, _, _| sink.set(sink.get() + 1)),
        );

        runtime.resolve_nth(0, "\"once\"");
        runtime.resolve_nth(0, "\"twice\"");
        pump(&mut core, &mut channel);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn continuation_can_chain_a_follow_up_call() {
        let runtime = FakeRuntime::shared();
        let mut channel = CommandChannel::new(runtime.clone());
        let mut core = EditorCore::new(EditorCallbacks::default());

        channel.execute(
            "RV.getHtml()",
            Box::new(|_, channel, _| {
                channel.execute("RV.getHeight()", Box::new(|_, _, _| {}));
            }),
        );
        runtime.resolve_next("\"x\"");
        pump(&mut core, &mut channel);

        assert_eq!(runtime.submitted_scripts(), vec!["RV.getHtml()", "RV.getHeight()"]);
        assert_eq!(channel.in_flight(), 1);
    }
}
