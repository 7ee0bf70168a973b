//! Test double for the embedded engine: records submitted scripts and
//! lets tests resolve them manually or through canned stubs.

use std::cell::RefCell;
use std::rc::Rc;

use crate::channel::{CallId, ResultSink, ScriptRuntime};

struct Submission {
    id: CallId,
    script: String,
    sink: ResultSink,
    resolved: bool,
}

#[derive(Default)]
pub(crate) struct FakeRuntime {
    submissions: RefCell<Vec<Submission>>,
    /// `(script prefix, raw JSON outcome)` pairs answered immediately at
    /// submit time, letting a single `pump` drive a whole call chain.
    stubs: RefCell<Vec<(String, String)>>,
}

impl FakeRuntime {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Auto-answer every submitted script starting with `prefix` with the
    /// given raw (JSON-serialized) engine result.
    pub fn stub(&self, prefix: &str, raw: &str) {
        self.stubs
            .borrow_mut()
            .push((prefix.to_owned(), raw.to_owned()));
    }

    /// All scripts submitted so far, in submission order.
    pub fn submitted_scripts(&self) -> Vec<String> {
        self.submissions
            .borrow()
            .iter()
            .map(|s| s.script.clone())
            .collect()
    }

    /// Resolve the oldest still-unresolved submission.
    pub fn resolve_next(&self, raw: &str) {
        let mut subs = self.submissions.borrow_mut();
        let sub = subs
            .iter_mut()
            .find(|s| !s.resolved)
            .expect("no unresolved submission");
        sub.resolved = true;
        sub.sink.lock().unwrap().push((sub.id, Ok(raw.to_owned())));
    }

    /// Resolve the `n`-th submission (0-based, counting every submission),
    /// even if it was already resolved, so duplicates can exercise the channel's
    /// exactly-once guarantee.
    pub fn resolve_nth(&self, n: usize, raw: &str) {
        let mut subs = self.submissions.borrow_mut();
        let sub = &mut subs[n];
        sub.resolved = true;
        sub.sink.lock().unwrap().push((sub.id, Ok(raw.to_owned())));
    }

    /// Fail the oldest still-unresolved submission with an engine error.
    pub fn fail_next(&self, message: &str) {
        let mut subs = self.submissions.borrow_mut();
        let sub = subs
            .iter_mut()
            .find(|s| !s.resolved)
            .expect("no unresolved submission");
        sub.resolved = true;
        sub.sink
            .lock()
            .unwrap()
            .push((sub.id, Err(message.to_owned())));
    }
}

impl ScriptRuntime for FakeRuntime {
    fn submit(&self, id: CallId, script: &str, sink: ResultSink) {
        let stubbed = self
            .stubs
            .borrow()
            .iter()
            .find(|(prefix, _)| script.starts_with(prefix.as_str()))
            .map(|(_, raw)| raw.clone());
        let resolved = stubbed.is_some();
        if let Some(raw) = stubbed {
            sink.lock().unwrap().push((id, Ok(raw)));
        }
        self.submissions.borrow_mut().push(Submission {
            id,
            script: script.to_owned(),
            sink,
            resolved,
        });
    }
}
