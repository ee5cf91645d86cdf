//! Shelf Matrix - an in-memory store for items on a grid of shelves
//!
//! A shelf is a set of rows, each with its own number of compartments.
//! Items sit in compartments and are looked up by id or by coordinate.
//! The grid can be walked slot by slot to render it, in the terminal or
//! anywhere else a [`domain::SlotPresenter`] can be written for.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    ItemId, ItemInput, ItemLocation, ItemUpdate, MatrixHandle, ShelfData, ShelfItem, ShelfStore,
};
