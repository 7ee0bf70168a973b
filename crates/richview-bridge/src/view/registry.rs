use std::collections::HashMap;

use tracing::debug;

use super::RichTextView;

/// Identifies one view within a registry.
pub type ViewId = u32;

/// Tracks the rich text views a host has open and pumps them together.
#[derive(Default)]
pub struct ViewRegistry {
    views: HashMap<ViewId, RichTextView>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a created view under `id`, replacing any previous one.
    pub fn insert(&mut self, id: ViewId, view: RichTextView) {
        self.views.insert(id, view);
    }

    pub fn get(&self, id: ViewId) -> Option<&RichTextView> {
        self.views.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut RichTextView> {
        self.views.get_mut(&id)
    }

    /// Destroy a view. In-flight script results for it are dropped when
    /// they arrive; nothing dangles.
    pub fn destroy(&mut self, id: ViewId) -> bool {
        let removed = self.views.remove(&id).is_some();
        if removed {
            debug!(id, "rich text view destroyed");
        }
        removed
    }

    /// Pump every registered view once. Call each event-loop tick.
    pub fn pump_all(&mut self) {
        for view in self.views.values_mut() {
            view.pump();
        }
    }

    pub fn active_ids(&self) -> Vec<ViewId> {
        self.views.keys().copied().collect()
    }

    pub fn count(&self) -> usize {
        self.views.len()
    }
}
