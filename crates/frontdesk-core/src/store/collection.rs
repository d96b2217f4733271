// ── Reactive entity collection ──
//
// An ordered list snapshot held in a `watch` channel. Mutations follow
// the three shapes the backend's data model calls for: wholesale
// replacement on fetch, append on create, point-patch on targeted
// mutations. Every mutation bumps a version counter and notifies
// subscribers with a fresh `Arc` snapshot.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Keyed;

/// An observable, ordered collection for a single entity type.
///
/// Snapshots are `Arc<Vec<Arc<T>>>` -- cheap to clone, safe to hand to
/// subscribers. Order is the backend's response order; replacement keeps
/// it, append goes to the tail, patch preserves position.
pub struct Collection<T: Clone + Send + Sync + 'static> {
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
    version: watch::Sender<u64>,
}

impl<T: Keyed + Clone + Send + Sync + 'static> Collection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        Self { snapshot, version }
    }

    /// Replace the whole collection with a fresh server response.
    pub(crate) fn replace(&self, items: Vec<T>) {
        let items: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();
        self.snapshot.send_modify(|snap| *snap = Arc::new(items));
        self.bump_version();
    }

    /// Append a newly created item to the tail.
    pub(crate) fn append(&self, item: T) {
        self.snapshot.send_modify(|snap| {
            let mut items = snap.as_ref().clone();
            items.push(Arc::new(item));
            *snap = Arc::new(items);
        });
        self.bump_version();
    }

    /// Point-patch the item matching `key`, leaving the rest untouched.
    ///
    /// Returns `false` without mutating or notifying when no item
    /// matches -- a missing id is a silent no-op, never an error.
    pub(crate) fn patch(&self, key: &str, f: impl FnOnce(&mut T)) -> bool {
        let mut patched = false;
        self.snapshot.send_if_modified(|snap| {
            let Some(pos) = snap.iter().position(|item| item.key() == key) else {
                return false;
            };
            let mut items = snap.as_ref().clone();
            let mut item = (*items[pos]).clone();
            f(&mut item);
            items[pos] = Arc::new(item);
            *snap = Arc::new(items);
            patched = true;
            true
        });
        if patched {
            self.bump_version();
        }
        patched
    }

    /// Remove all items.
    pub(crate) fn clear(&self) {
        self.snapshot.send_modify(|snap| *snap = Arc::new(Vec::new()));
        self.bump_version();
    }

    /// Look up an item by key.
    pub fn find(&self, key: &str) -> Option<Arc<T>> {
        self.snapshot
            .borrow()
            .iter()
            .find(|item| item.key() == key)
            .map(Arc::clone)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    /// Mutation counter, for tests and staleness checks.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: u32,
    }

    impl Keyed for Item {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: u32) -> Item {
        Item {
            id: id.into(),
            value,
        }
    }

    #[test]
    fn replace_swaps_the_whole_snapshot() {
        let col: Collection<Item> = Collection::new();
        col.replace(vec![item("a", 1), item("b", 2)]);
        assert_eq!(col.len(), 2);

        col.replace(vec![item("c", 3)]);
        let snap = col.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].id, "c");
    }

    #[test]
    fn append_preserves_order() {
        let col: Collection<Item> = Collection::new();
        col.replace(vec![item("a", 1)]);
        col.append(item("b", 2));

        let snap = col.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[1].id, "b");
    }

    #[test]
    fn patch_mutates_only_the_match() {
        let col: Collection<Item> = Collection::new();
        col.replace(vec![item("a", 1), item("b", 2)]);

        assert!(col.patch("b", |i| i.value = 20));

        let snap = col.snapshot();
        assert_eq!(snap[0].value, 1);
        assert_eq!(snap[1].value, 20);
    }

    #[test]
    fn patch_of_missing_key_is_a_noop() {
        let col: Collection<Item> = Collection::new();
        col.replace(vec![item("a", 1)]);
        let version_before = col.version();

        assert!(!col.patch("zzz", |i| i.value = 99));

        assert_eq!(col.version(), version_before);
        assert_eq!(col.snapshot()[0].value, 1);
    }

    #[test]
    fn patch_of_missing_key_does_not_notify() {
        let col: Collection<Item> = Collection::new();
        col.replace(vec![item("a", 1)]);

        let mut rx = col.subscribe();
        rx.borrow_and_update();

        col.patch("zzz", |i| i.value = 99);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn find_by_key() {
        let col: Collection<Item> = Collection::new();
        col.replace(vec![item("a", 1), item("b", 2)]);

        assert_eq!(col.find("b").unwrap().value, 2);
        assert!(col.find("zzz").is_none());
    }

    #[test]
    fn clear_empties_everything() {
        let col: Collection<Item> = Collection::new();
        col.replace(vec![item("a", 1)]);
        col.clear();
        assert!(col.is_empty());
        assert!(col.snapshot().is_empty());
    }

    #[test]
    fn version_counts_mutations() {
        let col: Collection<Item> = Collection::new();
        assert_eq!(col.version(), 0);
        col.replace(vec![item("a", 1)]);
        col.append(item("b", 2));
        col.patch("a", |i| i.value = 10);
        assert_eq!(col.version(), 3);
    }
}
