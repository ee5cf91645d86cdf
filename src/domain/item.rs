//! Shelf item domain model
//!
//! An item occupies exactly one compartment of one shelf. Items carry a
//! category, a quantity and an open metadata map whose only key with a
//! defined meaning is `width`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::ItemId;

/// Category given to items added without one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Quantity given to items added without one
pub const DEFAULT_QUANTITY: u32 = 1;

/// Width assumed when an item's metadata has none
pub const DEFAULT_WIDTH: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("Invalid location: expected '{{shelf}}:{{compartment}}', got '{0}'")]
    InvalidFormat(String),

    #[error("Invalid index '{0}': expected a non-negative integer")]
    InvalidIndex(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum MetaError {
    #[error("Invalid metadata entry: expected 'key=value', got '{0}'")]
    InvalidEntry(String),

    #[error("Metadata key must not be empty")]
    EmptyKey,
}

/// Coordinate of a compartment: shelf index and compartment index
///
/// Both indices are zero-based. Nothing here checks them against a shelf's
/// structure; coordinates outside the grid are valid values that the grid
/// traversal simply never visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemLocation {
    pub shelf: usize,
    pub compartment: usize,
}

impl ItemLocation {
    pub fn new(shelf: usize, compartment: usize) -> Self {
        Self { shelf, compartment }
    }

    /// Returns true if this location is the given coordinate
    pub fn is_at(&self, shelf: usize, compartment: usize) -> bool {
        self.shelf == shelf && self.compartment == compartment
    }
}

impl fmt::Display for ItemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.shelf, self.compartment)
    }
}

impl FromStr for ItemLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (shelf, compartment) = s
            .split_once(':')
            .ok_or_else(|| LocationError::InvalidFormat(s.to_string()))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| LocationError::InvalidIndex(part.to_string()))
        };

        Ok(Self {
            shelf: parse(shelf)?,
            compartment: parse(compartment)?,
        })
    }
}

/// A primitive metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl MetaValue {
    /// Returns the value as a number, if it is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetaValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Parses a CLI-supplied value: booleans, then numbers, then text
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => MetaValue::Bool(true),
            "false" => MetaValue::Bool(false),
            _ => raw
                .parse::<f64>()
                .map(MetaValue::Number)
                .unwrap_or_else(|_| MetaValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::Number(n) => write!(f, "{}", n),
            MetaValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Number(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

/// Open key/value metadata attached to an item
///
/// The default value is `{width: 1}`, which is what items get when they
/// are added without metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemMetadata(BTreeMap<String, MetaValue>);

impl ItemMetadata {
    /// Creates metadata with no entries at all
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates metadata holding only a width
    pub fn with_width(width: f64) -> Self {
        let mut meta = Self::empty();
        meta.set("width", width);
        meta
    }

    /// Returns the item width, falling back to the default width
    pub fn width(&self) -> f64 {
        self.get("width")
            .and_then(MetaValue::as_number)
            .unwrap_or(DEFAULT_WIDTH)
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Sets a metadata entry, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Option<MetaValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }

    /// Parses a `key=value` pair and stores it
    pub fn set_entry(&mut self, entry: &str) -> Result<(), MetaError> {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| MetaError::InvalidEntry(entry.to_string()))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(MetaError::EmptyKey);
        }

        self.set(key, MetaValue::parse(value.trim()));
        Ok(())
    }
}

impl Default for ItemMetadata {
    fn default() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }
}

/// An item placed in a compartment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfItem {
    pub id: ItemId,
    pub category: String,
    pub quantity: u32,
    pub location: ItemLocation,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl ShelfItem {
    /// Returns true if the item sits at the given coordinate
    pub fn is_at(&self, shelf: usize, compartment: usize) -> bool {
        self.location.is_at(shelf, compartment)
    }

    /// Returns the item width from its metadata
    pub fn width(&self) -> f64 {
        self.metadata.width()
    }

    /// Merges a partial update onto this item
    ///
    /// Every field present in the update replaces the item's field; absent
    /// fields are kept. A zero quantity counts as absent. `metadata` is
    /// replaced as a whole.
    pub fn apply(&mut self, update: ItemUpdate) {
        if let Some(id) = update.id {
            self.id = id;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity.filter(|q| *q > 0) {
            self.quantity = quantity;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
    }
}

/// Caller-supplied fields for a new item
///
/// The location is not part of the input: an added item always lands at
/// the coordinate passed to the add operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemInput {
    pub id: Option<ItemId>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub metadata: Option<ItemMetadata>,
}

impl ItemInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn metadata(mut self, metadata: ItemMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A partial item used for shallow-merge updates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemUpdate {
    pub id: Option<ItemId>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub location: Option<ItemLocation>,
    pub metadata: Option<ItemMetadata>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn location(mut self, shelf: usize, compartment: usize) -> Self {
        self.location = Some(ItemLocation::new(shelf, compartment));
        self
    }

    pub fn metadata(mut self, metadata: ItemMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns true if the update carries no fields
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
