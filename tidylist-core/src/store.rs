//! In-memory todo collection with commit observers.

use chrono::Utc;

use crate::models::TodoItem;

/// Observer invoked synchronously after every committed mutation.
///
/// Observers receive the full post-commit snapshot, exactly once per
/// mutation. A call that changes nothing (blank text on add, unknown id
/// elsewhere) commits nothing and notifies nobody.
pub trait StoreObserver: Send {
    fn snapshot_committed(&self, items: &[TodoItem]);
}

impl<F> StoreObserver for F
where
    F: Fn(&[TodoItem]) + Send,
{
    fn snapshot_committed(&self, items: &[TodoItem]) {
        self(items)
    }
}

/// Issues collection-unique ids from the millisecond clock.
///
/// Ids are the current Unix time in milliseconds rendered as a decimal
/// string. When a second id is requested on the same tick (or the clock
/// steps backwards), a sequence suffix keeps the ids distinct.
#[derive(Debug, Default)]
struct IdClock {
    last_millis: i64,
    sequence: u32,
}

impl IdClock {
    fn next(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        if now > self.last_millis {
            self.last_millis = now;
            self.sequence = 0;
            now.to_string()
        } else {
            self.sequence += 1;
            format!("{}-{}", self.last_millis, self.sequence)
        }
    }
}

/// Ordered collection of todo items.
///
/// Items keep their insertion order across every operation; deletion removes
/// in place without reordering the survivors. Mutations are synchronous and
/// exclusive, so no two of them ever interleave.
#[derive(Default)]
pub struct TodoStore {
    items: Vec<TodoItem>,
    clock: IdClock,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl TodoStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer for post-commit snapshots.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Replaces the whole collection from a persisted snapshot.
    ///
    /// Intended for startup hydration only. Does not notify observers.
    pub fn hydrate(&mut self, items: Vec<TodoItem>) {
        self.items = items;
    }

    /// Appends a new item with the given text and returns a copy of it.
    ///
    /// Text that trims to empty is rejected silently and `None` is returned.
    /// Accepted text is stored with its original whitespace intact.
    pub fn add(&mut self, text: &str) -> Option<TodoItem> {
        if text.trim().is_empty() {
            return None;
        }
        let item = TodoItem::new(self.clock.next(), text);
        self.items.push(item.clone());
        self.emit();
        Some(item)
    }

    /// Inverts the completion flag of the item with the given id.
    ///
    /// Unknown ids are a silent no-op.
    pub fn toggle_completed(&mut self, id: &str) {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.completed = !item.completed,
            None => return,
        }
        self.emit();
    }

    /// Replaces the text of the item with the given id.
    ///
    /// Unlike [`add`](Self::add), no trimming or emptiness check is applied.
    /// Unknown ids are a silent no-op.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.text = text.into(),
            None => return,
        }
        self.emit();
    }

    /// Removes the item with the given id, keeping the rest in order.
    ///
    /// Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: &str) {
        let len_before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() != len_before {
            self.emit();
        }
    }

    /// Read-only view of the current collection, in insertion order.
    pub fn snapshot(&self) -> &[TodoItem] {
        &self.items
    }

    fn emit(&self) {
        for observer in &self.observers {
            observer.snapshot_committed(&self.items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_add_appends_in_order() {
        let mut todos = TodoStore::new();
        todos.add("Buy milk");
        todos.add("Walk dog");
        todos.add("Water plants");

        let texts: Vec<_> = todos.snapshot().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Buy milk", "Walk dog", "Water plants"]);
    }

    #[test]
    fn test_add_keeps_original_whitespace() {
        let mut todos = TodoStore::new();
        let item = todos.add("  Buy milk  ").unwrap();
        assert_eq!(item.text, "  Buy milk  ");
        assert_eq!(todos.snapshot()[0].text, "  Buy milk  ");
    }

    #[test]
    fn test_add_blank_is_a_no_op() {
        let mut todos = TodoStore::new();
        assert!(todos.add("").is_none());
        assert!(todos.add("   ").is_none());
        assert!(todos.add("\t\n").is_none());
        assert!(todos.snapshot().is_empty());
    }

    #[test]
    fn test_rapid_adds_get_distinct_ids() {
        let mut todos = TodoStore::new();
        for i in 0..500 {
            todos.add(&format!("todo {}", i));
        }
        let ids: HashSet<_> = todos.snapshot().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut todos = TodoStore::new();
        let item = todos.add("Buy milk").unwrap();

        todos.toggle_completed(&item.id);
        assert!(todos.snapshot()[0].completed);

        todos.toggle_completed(&item.id);
        let after = &todos.snapshot()[0];
        assert!(!after.completed);
        assert_eq!(after.id, item.id);
        assert_eq!(after.text, item.text);
    }

    #[test]
    fn test_toggle_preserves_order() {
        let mut todos = TodoStore::new();
        let first = todos.add("Buy milk").unwrap();
        todos.add("Walk dog");

        todos.toggle_completed(&first.id);

        let texts: Vec<_> = todos.snapshot().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Buy milk", "Walk dog"]);
    }

    #[test]
    fn test_set_text_allows_anything() {
        let mut todos = TodoStore::new();
        let item = todos.add("Buy milk").unwrap();

        todos.set_text(&item.id, "");
        assert_eq!(todos.snapshot()[0].text, "");

        todos.set_text(&item.id, "   ");
        assert_eq!(todos.snapshot()[0].text, "   ");
    }

    #[test]
    fn test_remove_preserves_survivor_order() {
        let mut todos = TodoStore::new();
        todos.add("Buy milk");
        let second = todos.add("Walk dog").unwrap();
        todos.add("Water plants");

        todos.remove(&second.id);

        let texts: Vec<_> = todos.snapshot().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Buy milk", "Water plants"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut todos = TodoStore::new();
        let item = todos.add("Buy milk").unwrap();
        todos.add("Walk dog");

        todos.remove(&item.id);
        let after_first = todos.snapshot().to_vec();
        todos.remove(&item.id);
        assert_eq!(todos.snapshot(), after_first.as_slice());
    }

    #[test]
    fn test_unknown_id_leaves_collection_unchanged() {
        let mut todos = TodoStore::new();
        todos.add("Buy milk");
        let before = todos.snapshot().to_vec();

        todos.toggle_completed("nope");
        todos.set_text("nope", "changed");
        todos.remove("nope");

        assert_eq!(todos.snapshot(), before.as_slice());
    }

    #[test]
    fn test_hydrate_replaces_wholesale() {
        let mut todos = TodoStore::new();
        todos.add("stale");

        let mut restored = TodoItem::new("1700000000000", "Buy milk");
        restored.completed = true;
        todos.hydrate(vec![restored.clone(), TodoItem::new("1700000000001", "Walk dog")]);

        assert_eq!(todos.snapshot().len(), 2);
        assert_eq!(todos.snapshot()[0], restored);
    }

    #[test]
    fn test_observer_fires_once_per_commit() {
        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut todos = TodoStore::new();
        todos.subscribe(Box::new(move |items: &[TodoItem]| {
            sink.lock().unwrap().push(items.len());
        }));

        let item = todos.add("Buy milk").unwrap();
        todos.toggle_completed(&item.id);
        todos.remove(&item.id);

        assert_eq!(*seen.lock().unwrap(), vec![1, 1, 0]);
    }

    #[test]
    fn test_no_op_does_not_notify() {
        let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut todos = TodoStore::new();
        todos.subscribe(Box::new(move |items: &[TodoItem]| {
            sink.lock().unwrap().push(items.len());
        }));

        todos.add("   ");
        todos.toggle_completed("nope");
        todos.set_text("nope", "changed");
        todos.remove("nope");
        todos.hydrate(Vec::new());

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_scenario_add_toggle_then_replace() {
        let mut todos = TodoStore::new();

        let first = todos.add("Buy milk").unwrap();
        assert_eq!(todos.snapshot().len(), 1);
        assert_eq!(todos.snapshot()[0].text, "Buy milk");
        assert!(!todos.snapshot()[0].completed);

        todos.toggle_completed(&first.id);
        assert!(todos.snapshot()[0].completed);

        todos.add("Walk dog");
        todos.remove(&first.id);

        assert_eq!(todos.snapshot().len(), 1);
        assert_eq!(todos.snapshot()[0].text, "Walk dog");
        assert!(!todos.snapshot()[0].completed);
    }
}
