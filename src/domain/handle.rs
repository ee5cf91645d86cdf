//! Shareable store handle
//!
//! [`MatrixHandle`] puts a [`ShelfStore`] behind a mutex so several parts of
//! a program can hold the same store. Each operation takes the lock exactly
//! once, so no two mutations interleave.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::grid::SlotPresenter;
use super::id::ItemId;
use super::item::{ItemInput, ItemUpdate, ShelfItem};
use super::shelf::ShelfData;
use super::store::ShelfStore;

/// Cloneable, lock-guarded reference to a store
#[derive(Debug, Clone)]
pub struct MatrixHandle {
    inner: Arc<Mutex<ShelfStore>>,
}

impl MatrixHandle {
    pub fn new(store: ShelfStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Creates a handle over a fresh store seeded with `data`
    pub fn from_data(data: ShelfData) -> Self {
        Self::new(ShelfStore::new(data))
    }

    // Store operations never leave partial state behind, so a poisoned
    // lock still guards a consistent store.
    fn lock(&self) -> MutexGuard<'_, ShelfStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with shared access to the store
    pub fn read<R>(&self, f: impl FnOnce(&ShelfStore) -> R) -> R {
        let store = self.lock();
        f(&store)
    }

    pub fn add_item(&self, shelf: usize, compartment: usize, input: ItemInput) -> ItemId {
        self.lock().add_item(shelf, compartment, input)
    }

    pub fn remove_item(&self, id: &ItemId) -> Option<ShelfItem> {
        self.lock().remove_item(id)
    }

    pub fn remove_item_by_location(&self, shelf: usize, compartment: usize) -> Option<ShelfItem> {
        self.lock().remove_item_by_location(shelf, compartment)
    }

    pub fn update_item(&self, id: &ItemId, update: ItemUpdate) -> bool {
        self.lock().update_item(id, update)
    }

    /// Returns a copy of the item at a coordinate
    pub fn get_item_by_location(&self, shelf: usize, compartment: usize) -> Option<ShelfItem> {
        self.lock().get_item_by_location(shelf, compartment).cloned()
    }

    /// Returns a copy of all items
    pub fn get_items(&self) -> Vec<ShelfItem> {
        self.lock().get_items().to_vec()
    }

    pub fn total_items(&self) -> usize {
        self.lock().total_items()
    }

    /// Returns a copy of the full state
    pub fn snapshot(&self) -> ShelfData {
        self.lock().data().clone()
    }

    /// Presents every slot under a single lock acquisition
    pub fn render_matrix<P: SlotPresenter>(&self, presenter: &P) -> Vec<Vec<P::Output>> {
        self.lock().render_matrix(presenter)
    }

    /// Returns true if both handles refer to the same store
    pub fn same_store(&self, other: &MatrixHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn handle() -> MatrixHandle {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        MatrixHandle::from_data(ShelfData::new("h", created, vec![8, 8, 8, 8], 32))
    }

    #[test]
    fn clones_share_one_store() {
        let a = handle();
        let b = a.clone();

        a.add_item(0, 0, ItemInput::new().id("x"));

        assert!(a.same_store(&b));
        assert_eq!(b.get_item_by_location(0, 0).map(|i| i.id), Some(ItemId::from("x")));
        assert_eq!(b.total_items(), 1);
    }

    #[test]
    fn concurrent_adds_keep_count_consistent() {
        let handle = handle();

        let workers: Vec<_> = (0..4)
            .map(|shelf| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for compartment in 0..8 {
                        handle.add_item(shelf, compartment, ItemInput::new());
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.items().len(), 32);
        assert_eq!(snapshot.structure().total_items, 32);

        let mut ids: Vec<_> = snapshot.items().iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn read_sees_latest_state() {
        let handle = handle();
        handle.add_item(1, 1, ItemInput::new().id("y"));
        handle.update_item(&ItemId::from("y"), ItemUpdate::new().category("Maps"));

        let category = handle.read(|store| {
            store.get_item(&ItemId::from("y")).map(|i| i.category.clone())
        });
        assert_eq!(category.as_deref(), Some("Maps"));
    }
}
