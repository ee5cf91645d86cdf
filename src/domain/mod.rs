//! Domain models for the shelf matrix
//!
//! Contains the shelf data model, the in-memory store and grid traversal,
//! without any I/O concerns.

mod id;
mod item;
mod shelf;
mod store;
mod grid;
mod handle;
pub mod context;

pub use id::{IdGenerator, ItemId, DEFAULT_ID_PREFIX};
pub use item::{
    ItemInput, ItemLocation, ItemMetadata, ItemUpdate, LocationError, MetaError, MetaValue,
    ShelfItem, DEFAULT_CATEGORY, DEFAULT_QUANTITY, DEFAULT_WIDTH,
};
pub use shelf::{SeedWarning, Shelf, ShelfData, ShelfStructure};
pub use store::ShelfStore;
pub use grid::{DefaultPresenter, SlotPresenter, Slots};
pub use handle::MatrixHandle;
pub use context::ContextError;
