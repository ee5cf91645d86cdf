//! In-memory shelf store
//!
//! [`ShelfStore`] owns one [`ShelfData`] and is the only way to change it.
//! Every operation runs to completion before returning and leaves
//! `total_items` equal to the number of placed items.
//!
//! Lookups that find nothing are not errors: removals and updates of
//! unknown items are no-ops and coordinate lookups return `None`.

use super::id::{IdGenerator, ItemId, DEFAULT_ID_PREFIX};
use super::item::{
    ItemInput, ItemLocation, ItemUpdate, ShelfItem, DEFAULT_CATEGORY, DEFAULT_QUANTITY,
};
use super::shelf::{ShelfData, ShelfStructure};

/// Holder of all shelf and item state
#[derive(Debug, Clone)]
pub struct ShelfStore {
    data: ShelfData,
    ids: IdGenerator,
}

impl ShelfStore {
    /// Creates a store seeded with `data`
    ///
    /// The seed's `total_items` is recomputed from its items.
    pub fn new(data: ShelfData) -> Self {
        Self::with_id_prefix(data, DEFAULT_ID_PREFIX)
    }

    /// Creates a store whose generated ids use `prefix`
    pub fn with_id_prefix(mut data: ShelfData, prefix: impl Into<String>) -> Self {
        data.shelf.structure.total_items = data.shelf.items.len();
        Self {
            data,
            ids: IdGenerator::new(prefix),
        }
    }

    /// Returns the current state
    pub fn data(&self) -> &ShelfData {
        &self.data
    }

    pub fn structure(&self) -> &ShelfStructure {
        &self.data.shelf.structure
    }

    pub fn total_items(&self) -> usize {
        self.data.shelf.structure.total_items
    }

    /// Places an item at a coordinate
    ///
    /// Missing fields are defaulted: a generated id, the `Uncategorized`
    /// category, a quantity of 1 and `{width: 1}` metadata. Empty ids,
    /// empty categories and zero quantities count as missing. Whatever
    /// occupied the coordinate is replaced, as is any item elsewhere that
    /// holds the same explicit id. Returns the placed item's id.
    pub fn add_item(&mut self, shelf: usize, compartment: usize, input: ItemInput) -> ItemId {
        let id = match input.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let items = &self.data.shelf.items;
                self.ids.next_id(|candidate| items.iter().any(|i| &i.id == candidate))
            }
        };

        let item = ShelfItem {
            id: id.clone(),
            category: input
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            quantity: input
                .quantity
                .filter(|q| *q > 0)
                .unwrap_or(DEFAULT_QUANTITY),
            location: ItemLocation::new(shelf, compartment),
            metadata: input.metadata.unwrap_or_default(),
        };

        let items = &mut self.data.shelf.items;
        // Any other holder of the id is evicted, so ids stay unique
        items.retain(|i| i.id != id || i.is_at(shelf, compartment));
        match items.iter().position(|i| i.is_at(shelf, compartment)) {
            Some(index) => items[index] = item,
            None => items.push(item),
        }

        self.sync_total();
        id
    }

    /// Removes every item with the given id, returning the first
    pub fn remove_item(&mut self, id: &ItemId) -> Option<ShelfItem> {
        let removed = self.data.shelf.items.iter().find(|i| &i.id == id).cloned()?;
        self.data.shelf.items.retain(|i| &i.id != id);
        self.sync_total();
        Some(removed)
    }

    /// Removes whatever occupies a coordinate, returning it
    pub fn remove_item_by_location(&mut self, shelf: usize, compartment: usize) -> Option<ShelfItem> {
        let index = self
            .data
            .shelf
            .items
            .iter()
            .position(|i| i.is_at(shelf, compartment))?;
        let removed = self.data.shelf.items.remove(index);
        self.sync_total();
        Some(removed)
    }

    /// Merges a partial update onto the item with the given id
    ///
    /// Returns false if no item has that id. An update that moves the item
    /// onto an occupied coordinate evicts the occupant, the same way
    /// [`add_item`](Self::add_item) replaces one. An update that renames the
    /// item to an id held by another item evicts that other item.
    pub fn update_item(&mut self, id: &ItemId, update: ItemUpdate) -> bool {
        let items = &self.data.shelf.items;
        let Some(index) = items.iter().position(|i| &i.id == id) else {
            return false;
        };

        let mut merged = items[index].clone();
        merged.apply(update);

        let evicted = |i: &ShelfItem| {
            (i.location == merged.location && merged.location != items[index].location)
                || (i.id == merged.id && &merged.id != id)
        };
        let mut next: Vec<ShelfItem> = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if position == index {
                next.push(merged.clone());
            } else if !evicted(item) {
                next.push(item.clone());
            }
        }

        self.data.shelf.items = next;
        self.sync_total();
        true
    }

    /// Returns the item at a coordinate
    pub fn get_item_by_location(&self, shelf: usize, compartment: usize) -> Option<&ShelfItem> {
        self.data
            .shelf
            .items
            .iter()
            .find(|i| i.is_at(shelf, compartment))
    }

    /// Returns the item with the given id
    pub fn get_item(&self, id: &ItemId) -> Option<&ShelfItem> {
        self.data.shelf.items.iter().find(|i| &i.id == id)
    }

    /// Returns all placed items
    pub fn get_items(&self) -> &[ShelfItem] {
        &self.data.shelf.items
    }

    fn sync_total(&mut self) {
        self.data.shelf.structure.total_items = self.data.shelf.items.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{ItemMetadata, MetaValue};
    use proptest::prelude::*;

    fn empty_store(layout: Vec<usize>) -> ShelfStore {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        let capacity = layout.iter().sum();
        ShelfStore::new(ShelfData::new("shelf-test", created, layout, capacity))
    }

    fn id(s: &str) -> ItemId {
        ItemId::from(s)
    }

    fn assert_count_consistent(store: &ShelfStore) {
        assert_eq!(store.total_items(), store.get_items().len());
    }

    #[test]
    fn end_to_end_scenario() {
        let mut store = empty_store(vec![2, 2]);

        store.add_item(0, 0, ItemInput::new().id("a"));
        store.add_item(0, 1, ItemInput::new().id("b"));
        store.add_item(1, 0, ItemInput::new().id("c"));

        assert_eq!(store.get_items().len(), 3);
        assert_eq!(store.total_items(), 3);
        assert!(store.get_item_by_location(1, 1).is_none());

        let removed = store.remove_item_by_location(0, 0);
        assert_eq!(removed.map(|i| i.id), Some(id("a")));
        assert_eq!(store.get_items().len(), 2);
        assert_eq!(store.total_items(), 2);
        assert!(store.get_item_by_location(0, 0).is_none());
        assert_eq!(store.get_item_by_location(0, 1).unwrap().id, "b");

        assert!(store.update_item(&id("b"), ItemUpdate::new().quantity(5)));
        let b = store.get_item_by_location(0, 1).unwrap();
        assert_eq!(b.quantity, 5);
        assert_eq!(b.id, "b");
        assert_eq!(b.category, DEFAULT_CATEGORY);
        assert_eq!(b.location, ItemLocation::new(0, 1));
    }

    #[test]
    fn add_fills_defaults() {
        let mut store = empty_store(vec![2]);
        store.add_item(0, 1, ItemInput::new().id("item-1"));

        let new_id = store.add_item(0, 0, ItemInput::new());
        let item = store.get_item(&new_id).unwrap();

        assert!(!item.id.is_empty());
        assert_ne!(item.id, "item-1");
        assert_eq!(item.category, "Uncategorized");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.metadata.get("width"), Some(&MetaValue::Number(1.0)));
        assert_eq!(item.metadata.len(), 1);
    }

    #[test]
    fn add_treats_empty_values_as_missing() {
        let mut store = empty_store(vec![1]);
        let new_id = store.add_item(0, 0, ItemInput::new().id("").category("").quantity(0));
        let item = store.get_item(&new_id).unwrap();

        assert!(!item.id.is_empty());
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.quantity, DEFAULT_QUANTITY);
    }

    #[test]
    fn add_keeps_supplied_metadata_as_is() {
        let mut store = empty_store(vec![1]);
        let mut meta = ItemMetadata::empty();
        meta.set("color", "teal");

        let new_id = store.add_item(0, 0, ItemInput::new().metadata(meta.clone()));
        assert_eq!(store.get_item(&new_id).unwrap().metadata, meta);
    }

    #[test]
    fn add_overrides_occupant() {
        let mut store = empty_store(vec![3]);
        store.add_item(0, 2, ItemInput::new().id("other"));
        let before = store.total_items();

        store.add_item(0, 0, ItemInput::new().id("first").category("Books"));
        store.add_item(0, 0, ItemInput::new().id("second").category("Maps").quantity(3));

        assert_eq!(store.total_items(), before + 1);
        assert!(store.get_item(&id("first")).is_none());
        let item = store.get_item_by_location(0, 0).unwrap();
        assert_eq!(item.id, "second");
        assert_eq!(item.category, "Maps");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn override_keeps_position_in_collection() {
        let mut store = empty_store(vec![3]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        store.add_item(0, 1, ItemInput::new().id("b"));
        store.add_item(0, 0, ItemInput::new().id("z"));

        let ids: Vec<_> = store.get_items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "b"]);
    }

    #[test]
    fn add_accepts_coordinates_outside_grid() {
        let mut store = empty_store(vec![2]);
        store.add_item(7, 42, ItemInput::new().id("far"));

        assert_eq!(store.total_items(), 1);
        assert_eq!(store.get_item_by_location(7, 42).unwrap().id, "far");
    }

    #[test]
    fn generated_ids_do_not_collide_with_seed() {
        let mut store = empty_store(vec![4]);
        store.add_item(0, 0, ItemInput::new().id("item-1"));
        store.add_item(0, 1, ItemInput::new().id("item-2"));

        let a = store.add_item(0, 2, ItemInput::new());
        let b = store.add_item(0, 3, ItemInput::new());

        assert_eq!(a, "item-3");
        assert_eq!(b, "item-4");
    }

    #[test]
    fn custom_id_prefix() {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        let data = ShelfData::new("s", created, vec![1], 1);
        let mut store = ShelfStore::with_id_prefix(data, "book");

        assert_eq!(store.add_item(0, 0, ItemInput::new()), "book-1");
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = empty_store(vec![2]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        store.add_item(0, 1, ItemInput::new().id("b"));

        assert!(store.remove_item(&id("a")).is_some());
        let once = store.data().clone();

        assert!(store.remove_item(&id("a")).is_none());
        assert_eq!(store.data(), &once);
        assert_count_consistent(&store);
    }

    #[test]
    fn add_with_held_id_evicts_holder() {
        let mut store = empty_store(vec![3]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        store.add_item(0, 2, ItemInput::new().id("c"));
        store.add_item(0, 1, ItemInput::new().id("a").category("Maps"));

        assert_eq!(store.total_items(), 2);
        assert!(store.get_item_by_location(0, 0).is_none());
        assert_eq!(store.get_item(&id("a")).unwrap().location, ItemLocation::new(0, 1));

        assert!(store.remove_item(&id("a")).is_some());
        let once = store.data().clone();
        assert!(store.remove_item(&id("a")).is_none());
        assert_eq!(store.data(), &once);
    }

    #[test]
    fn remove_drops_every_holder_of_a_seeded_duplicate() {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        let mut data = ShelfData::new("dup", created, vec![3], 3);
        for c in 0..3 {
            data.shelf.items.push(ShelfItem {
                id: id(if c == 2 { "b" } else { "a" }),
                category: DEFAULT_CATEGORY.to_string(),
                quantity: 1,
                location: ItemLocation::new(0, c),
                metadata: ItemMetadata::default(),
            });
        }
        let mut store = ShelfStore::new(data);

        let removed = store.remove_item(&id("a")).unwrap();
        assert!(removed.is_at(0, 0));
        assert_eq!(store.total_items(), 1);
        assert!(store.remove_item(&id("a")).is_none());
        assert_count_consistent(&store);
    }

    #[test]
    fn update_with_zero_quantity_keeps_current() {
        let mut store = empty_store(vec![1]);
        store.add_item(0, 0, ItemInput::new().id("a").quantity(4));

        assert!(store.update_item(&id("a"), ItemUpdate::new().quantity(0)));
        assert_eq!(store.get_item(&id("a")).unwrap().quantity, 4);
    }

    #[test]
    fn remove_unknown_leaves_state_untouched() {
        let mut store = empty_store(vec![2]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        let before = store.data().clone();

        assert!(store.remove_item(&id("missing")).is_none());
        assert!(store.remove_item_by_location(1, 1).is_none());
        assert_eq!(store.data(), &before);
    }

    #[test]
    fn update_unknown_is_noop() {
        let mut store = empty_store(vec![2]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        let before = store.data().clone();

        assert!(!store.update_item(&id("missing"), ItemUpdate::new().quantity(9)));
        assert_eq!(store.data(), &before);
    }

    #[test]
    fn update_onto_occupied_location_evicts_occupant() {
        let mut store = empty_store(vec![3]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        store.add_item(0, 1, ItemInput::new().id("b"));

        assert!(store.update_item(&id("a"), ItemUpdate::new().location(0, 1)));

        assert_eq!(store.total_items(), 1);
        assert!(store.get_item(&id("b")).is_none());
        assert_eq!(store.get_item_by_location(0, 1).unwrap().id, "a");
        assert!(store.get_item_by_location(0, 0).is_none());
    }

    #[test]
    fn update_to_same_location_keeps_item() {
        let mut store = empty_store(vec![2]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        store.add_item(0, 1, ItemInput::new().id("b"));

        assert!(store.update_item(&id("a"), ItemUpdate::new().location(0, 0).quantity(2)));
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.get_item(&id("a")).unwrap().quantity, 2);
    }

    #[test]
    fn rename_onto_existing_id_evicts_holder() {
        let mut store = empty_store(vec![2]);
        store.add_item(0, 0, ItemInput::new().id("a"));
        store.add_item(0, 1, ItemInput::new().id("b"));

        assert!(store.update_item(&id("a"), ItemUpdate::new().id("b")));

        assert_eq!(store.total_items(), 1);
        let b = store.get_item(&id("b")).unwrap();
        assert!(b.is_at(0, 0));
    }

    #[test]
    fn seed_total_is_recomputed() {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        let mut data = ShelfData::new("s", created, vec![2], 2);
        data.shelf.structure.total_items = 25;

        let store = ShelfStore::new(data);
        assert_eq!(store.total_items(), 0);
    }

    #[test]
    fn get_items_on_empty_store() {
        let store = empty_store(vec![3, 3]);
        assert!(store.get_items().is_empty());
        assert!(store.get_item_by_location(0, 0).is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, usize, Option<String>),
        Remove(String),
        RemoveAt(usize, usize),
        Move(String, usize, usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        let name = "[a-e]";
        prop_oneof![
            (0..3usize, 0..4usize, proptest::option::of(name)).prop_map(|(s, c, id)| Op::Add(s, c, id)),
            name.prop_map(Op::Remove),
            (0..3usize, 0..4usize).prop_map(|(s, c)| Op::RemoveAt(s, c)),
            (name, 0..3usize, 0..4usize).prop_map(|(id, s, c)| Op::Move(id, s, c)),
        ]
    }

    proptest! {
        #[test]
        fn count_matches_items_after_every_op(ops in proptest::collection::vec(op(), 0..40)) {
            let mut store = empty_store(vec![4, 4, 4]);
            for op in ops {
                match op {
                    Op::Add(s, c, id) => {
                        let input = match id {
                            Some(id) => ItemInput::new().id(id),
                            None => ItemInput::new(),
                        };
                        store.add_item(s, c, input);
                    }
                    Op::Remove(id) => {
                        store.remove_item(&ItemId::from(id));
                    }
                    Op::RemoveAt(s, c) => {
                        store.remove_item_by_location(s, c);
                    }
                    Op::Move(id, s, c) => {
                        store.update_item(&ItemId::from(id), ItemUpdate::new().location(s, c));
                    }
                }
                prop_assert_eq!(store.total_items(), store.get_items().len());

                let mut ids = std::collections::HashSet::new();
                for item in store.get_items() {
                    prop_assert!(ids.insert(item.id.clone()));
                }
            }
        }

        #[test]
        fn remove_twice_equals_once(
            adds in proptest::collection::vec((0..3usize, 0..4usize, "[a-e]"), 0..30),
            target in "[a-e]",
        ) {
            let mut store = empty_store(vec![4, 4, 4]);
            for (s, c, name) in adds {
                store.add_item(s, c, ItemInput::new().id(name));
            }

            let target = ItemId::from(target);
            store.remove_item(&target);
            let once = store.data().clone();
            prop_assert!(store.remove_item(&target).is_none());
            prop_assert_eq!(store.data(), &once);
        }

        #[test]
        fn adds_never_share_a_location(adds in proptest::collection::vec((0..3usize, 0..4usize), 0..40)) {
            let mut store = empty_store(vec![4, 4, 4]);
            for (s, c) in adds {
                store.add_item(s, c, ItemInput::new());
            }

            let mut seen = std::collections::HashSet::new();
            for item in store.get_items() {
                prop_assert!(seen.insert(item.location));
            }
        }
    }
}
