//! Shelf domain model
//!
//! A shelf is a grid: `num_shelves` rows, each with its own number of
//! compartments. [`ShelfData`] is the aggregate root handed to a store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::item::{ItemLocation, ShelfItem};
use super::id::ItemId;

/// Shape and bookkeeping counters of a shelf
///
/// `total_items` and `max_capacity` are bookkeeping only: the store keeps
/// `total_items` equal to the number of items, and nothing enforces
/// `max_capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfStructure {
    pub num_shelves: usize,
    pub compartments_per_shelf: Vec<usize>,
    pub total_compartments: usize,
    pub total_items: usize,
    pub max_capacity: usize,
}

impl ShelfStructure {
    /// Builds a structure from per-shelf compartment counts
    pub fn new(compartments_per_shelf: Vec<usize>, max_capacity: usize) -> Self {
        Self {
            num_shelves: compartments_per_shelf.len(),
            total_compartments: compartments_per_shelf.iter().sum(),
            compartments_per_shelf,
            total_items: 0,
            max_capacity,
        }
    }

    /// Number of compartments on a shelf, or `None` past the last shelf
    pub fn compartments(&self, shelf: usize) -> Option<usize> {
        self.compartments_per_shelf.get(shelf).copied()
    }

    /// Returns true if the coordinate lies within the declared grid
    pub fn contains(&self, location: ItemLocation) -> bool {
        self.compartments(location.shelf)
            .map(|count| location.compartment < count)
            .unwrap_or(false)
    }
}

/// One shelf unit: identity, creation date, structure and placed items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: String,
    pub creation_date: NaiveDateTime,
    pub structure: ShelfStructure,
    #[serde(default)]
    pub items: Vec<ShelfItem>,
}

/// Aggregate root owned by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfData {
    pub shelf: Shelf,
}

/// Something off about seed data
///
/// Seeds are accepted as-is; these are reported so callers can surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedWarning {
    /// `num_shelves` disagrees with the length of `compartments_per_shelf`
    ShelfCountMismatch { declared: usize, actual: usize },
    /// `total_compartments` disagrees with the sum of the per-shelf counts
    CompartmentCountMismatch { declared: usize, actual: usize },
    /// `total_items` disagrees with the number of items
    StaleItemCount { declared: usize, actual: usize },
    /// Two items share an id
    DuplicateId(ItemId),
    /// Two items share a coordinate
    DuplicateLocation(ItemLocation),
    /// An item sits outside the declared grid and will never be rendered
    OutOfGrid { id: ItemId, location: ItemLocation },
}

impl fmt::Display for SeedWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedWarning::ShelfCountMismatch { declared, actual } => write!(
                f,
                "num_shelves is {} but compartments_per_shelf has {} entries",
                declared, actual
            ),
            SeedWarning::CompartmentCountMismatch { declared, actual } => write!(
                f,
                "total_compartments is {} but shelves hold {} compartments",
                declared, actual
            ),
            SeedWarning::StaleItemCount { declared, actual } => {
                write!(f, "total_items is {} but {} items are placed", declared, actual)
            }
            SeedWarning::DuplicateId(id) => write!(f, "duplicate item id '{}'", id),
            SeedWarning::DuplicateLocation(loc) => {
                write!(f, "more than one item at location {}", loc)
            }
            SeedWarning::OutOfGrid { id, location } => {
                write!(f, "item '{}' at {} is outside the grid", id, location)
            }
        }
    }
}

impl ShelfData {
    /// Creates an empty shelf with the given compartment layout
    pub fn new(
        id: impl Into<String>,
        creation_date: NaiveDateTime,
        compartments_per_shelf: Vec<usize>,
        max_capacity: usize,
    ) -> Self {
        Self {
            shelf: Shelf {
                id: id.into(),
                creation_date,
                structure: ShelfStructure::new(compartments_per_shelf, max_capacity),
                items: Vec::new(),
            },
        }
    }

    pub fn structure(&self) -> &ShelfStructure {
        &self.shelf.structure
    }

    pub fn items(&self) -> &[ShelfItem] {
        &self.shelf.items
    }

    /// Checks the seed for inconsistencies without rejecting it
    pub fn validate(&self) -> Vec<SeedWarning> {
        let structure = &self.shelf.structure;
        let items = &self.shelf.items;
        let mut warnings = Vec::new();

        let actual_shelves = structure.compartments_per_shelf.len();
        if structure.num_shelves != actual_shelves {
            warnings.push(SeedWarning::ShelfCountMismatch {
                declared: structure.num_shelves,
                actual: actual_shelves,
            });
        }

        let actual_compartments: usize = structure.compartments_per_shelf.iter().sum();
        if structure.total_compartments != actual_compartments {
            warnings.push(SeedWarning::CompartmentCountMismatch {
                declared: structure.total_compartments,
                actual: actual_compartments,
            });
        }

        if structure.total_items != items.len() {
            warnings.push(SeedWarning::StaleItemCount {
                declared: structure.total_items,
                actual: items.len(),
            });
        }

        let mut ids = HashSet::new();
        let mut locations = HashSet::new();
        for item in items {
            if !ids.insert(&item.id) {
                warnings.push(SeedWarning::DuplicateId(item.id.clone()));
            }
            if !locations.insert(item.location) {
                warnings.push(SeedWarning::DuplicateLocation(item.location));
            }
            if !structure.contains(item.location) {
                warnings.push(SeedWarning::OutOfGrid {
                    id: item.id.clone(),
                    location: item.location,
                });
            }
        }

        warnings
    }
}
