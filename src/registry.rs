// Overlay registry
// Tracks which items currently have a live overlay window

use std::collections::HashMap;

use uuid::Uuid;

/// At most one live overlay window exists per item id. The registry maps an
/// item to whatever key the host uses to address its window.
#[derive(Debug, Default)]
pub struct OverlayRegistry<K> {
    open: HashMap<Uuid, K>,
}

impl<K: Clone> OverlayRegistry<K> {
    pub fn new() -> Self {
        Self {
            open: HashMap::new(),
        }
    }

    pub fn try_get(&self, id: Uuid) -> Option<K> {
        self.open.get(&id).cloned()
    }

    /// Register a window for an item. Returns false (without replacing the
    /// existing window) when the item already has one.
    pub fn insert(&mut self, id: Uuid, key: K) -> bool {
        if self.open.contains_key(&id) {
            return false;
        }
        self.open.insert(id, key);
        true
    }

    pub fn remove_on_close(&mut self, id: Uuid) {
        self.open.remove(&id);
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.open.len()
    }
}
