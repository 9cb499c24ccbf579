use serde_json::json;

use crate::logging::{log_event, LogLevel};

pub const SCROLL_POSITION_KEY: &str = "scrollPosition";

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub struct ScrollSlot<S> {
    store: S,
}

impl<S: SessionStore> ScrollSlot<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        let pixels = offset.max(0.0).round() as i64;
        self.store.set(SCROLL_POSITION_KEY, &pixels.to_string());
    }

    pub fn take(&self) -> Option<f64> {
        let raw = self.store.get(SCROLL_POSITION_KEY)?;
        self.store.remove(SCROLL_POSITION_KEY);

        let offset = raw.trim().parse::<i64>().ok().map(|pixels| pixels.max(0) as f64);
        if offset.is_none() {
            log_event(
                LogLevel::Debug,
                "scroll_slot_discarded",
                json!({ "raw": raw }),
            );
        }
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::HashMap};

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl SessionStore for &MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }

    #[test]
    fn saved_offset_is_read_once() {
        let store = MemoryStore::default();
        let slot = ScrollSlot::new(&store);

        slot.save(1_234.6);

        assert_eq!(store.entries.borrow().get(SCROLL_POSITION_KEY).cloned(), Some("1235".to_string()));
        assert_eq!(slot.take(), Some(1_235.0));
        assert_eq!(slot.take(), None);
        assert!(store.entries.borrow().is_empty());
    }

    #[test]
    fn unparsable_value_is_deleted_and_ignored() {
        let store = MemoryStore::default();
        (&store).set(SCROLL_POSITION_KEY, "NaNpx");
        let slot = ScrollSlot::new(&store);

        assert_eq!(slot.take(), None);
        assert!(store.entries.borrow().is_empty());
    }

    #[test]
    fn non_finite_offsets_are_not_saved() {
        let store = MemoryStore::default();
        let slot = ScrollSlot::new(&store);

        slot.save(f64::INFINITY);

        assert_eq!(slot.take(), None);
    }
}
