//! Watchable map from item to slide state.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use slidelist_core::SlideState;
use tokio::sync::watch;

/// Item to [`SlideState`] map that notifies subscribers only on change.
///
/// Items at rest are not stored, so the map only ever holds displaced items.
/// Clones share the same map.
#[derive(Debug)]
pub struct SlideStore<T> {
    tx: Arc<watch::Sender<HashMap<T, SlideState>>>,
}

impl<T> Clone for SlideStore<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Eq + Hash + Clone> Default for SlideStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> SlideStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(HashMap::new())),
        }
    }

    /// Set the state of one item. Returns whether anything changed.
    pub fn set(&self, item: &T, state: SlideState) -> bool {
        self.tx.send_if_modified(|map| {
            if state.is_displaced() {
                map.insert(item.clone(), state) != Some(state)
            } else {
                map.remove(item).is_some()
            }
        })
    }

    /// Current state of an item.
    pub fn get(&self, item: &T) -> SlideState {
        self.tx.borrow().get(item).copied().unwrap_or_default()
    }

    /// Put every item back at rest. Returns whether anything changed.
    pub fn reset_all(&self) -> bool {
        self.tx.send_if_modified(|map| {
            if map.is_empty() {
                false
            } else {
                map.clear();
                true
            }
        })
    }

    /// Number of displaced items.
    pub fn displaced_len(&self) -> usize {
        self.tx.borrow().len()
    }

    /// Copy of the current map.
    pub fn snapshot(&self) -> HashMap<T, SlideState> {
        self.tx.borrow().clone()
    }

    /// Subscribe to changes.
    pub fn subscribe(&self) -> watch::Receiver<HashMap<T, SlideState>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = SlideStore::new();
        assert_eq!(store.get(&"a"), SlideState::None);

        assert!(store.set(&"a", SlideState::Up));
        assert_eq!(store.get(&"a"), SlideState::Up);
        assert!(!store.set(&"a", SlideState::Up));

        assert!(store.set(&"a", SlideState::None));
        assert_eq!(store.displaced_len(), 0);
        assert!(!store.set(&"a", SlideState::None));
    }

    #[test]
    fn test_reset_all() {
        let store = SlideStore::new();
        store.set(&1, SlideState::Up);
        store.set(&2, SlideState::Down);
        assert_eq!(store.displaced_len(), 2);

        assert!(store.reset_all());
        assert!(store.snapshot().is_empty());
        assert!(!store.reset_all());
    }

    #[test]
    fn test_subscribers_see_only_changes() {
        let store = SlideStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.set(&"b", SlideState::None);
        assert!(!rx.has_changed().unwrap());

        store.set(&"b", SlideState::Down);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().get(&"b"), Some(&SlideState::Down));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SlideStore::new();
        let other = store.clone();
        other.set(&7u32, SlideState::Up);
        assert_eq!(store.get(&7), SlideState::Up);
    }
}
