//! Grid traversal for renderers
//!
//! A renderer walks every shelf in order and, within a shelf, every
//! compartment from 0 up to that shelf's compartment count. Each slot is
//! handed to a [`SlotPresenter`] together with its occupant, if any.
//! Items placed outside the declared grid are never visited.

use super::item::{ItemLocation, ShelfItem};
use super::shelf::ShelfStructure;
use super::store::ShelfStore;

/// Turns one slot of the grid into a presentation value
pub trait SlotPresenter {
    type Output;

    fn present(&self, item: Option<&ShelfItem>, shelf: usize, compartment: usize) -> Self::Output;
}

impl<F, T> SlotPresenter for F
where
    F: Fn(Option<&ShelfItem>, usize, usize) -> T,
{
    type Output = T;

    fn present(&self, item: Option<&ShelfItem>, shelf: usize, compartment: usize) -> T {
        self(item, shelf, compartment)
    }
}

/// Fallback presenter: the item's id, or an empty string for empty slots
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPresenter;

impl SlotPresenter for DefaultPresenter {
    type Output = String;

    fn present(&self, item: Option<&ShelfItem>, _shelf: usize, _compartment: usize) -> String {
        item.map(|i| i.id.to_string()).unwrap_or_default()
    }
}

/// Iterator over every coordinate of a grid, shelf by shelf
#[derive(Debug, Clone)]
pub struct Slots<'a> {
    counts: &'a [usize],
    shelf: usize,
    compartment: usize,
}

impl<'a> Slots<'a> {
    pub fn new(structure: &'a ShelfStructure) -> Self {
        Self {
            counts: &structure.compartments_per_shelf,
            shelf: 0,
            compartment: 0,
        }
    }
}

impl Iterator for Slots<'_> {
    type Item = ItemLocation;

    fn next(&mut self) -> Option<ItemLocation> {
        while let Some(&count) = self.counts.get(self.shelf) {
            if self.compartment < count {
                let location = ItemLocation::new(self.shelf, self.compartment);
                self.compartment += 1;
                return Some(location);
            }
            self.shelf += 1;
            self.compartment = 0;
        }
        None
    }
}

impl ShelfStore {
    /// Iterates every coordinate of the declared grid
    pub fn slots(&self) -> Slots<'_> {
        Slots::new(self.structure())
    }

    /// Presents every slot, one row per shelf
    pub fn render_matrix<P: SlotPresenter>(&self, presenter: &P) -> Vec<Vec<P::Output>> {
        self.structure()
            .compartments_per_shelf
            .iter()
            .enumerate()
            .map(|(shelf, &count)| {
                (0..count)
                    .map(|compartment| {
                        let item = self.get_item_by_location(shelf, compartment);
                        presenter.present(item, shelf, compartment)
                    })
                    .collect()
            })
            .collect()
    }

    /// Presents every slot with [`DefaultPresenter`]
    pub fn render_matrix_default(&self) -> Vec<Vec<String>> {
        self.render_matrix(&DefaultPresenter)
    }
}
