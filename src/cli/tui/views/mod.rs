//! Views for the shelf viewer

pub mod matrix;
pub mod slot;
