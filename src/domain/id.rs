//! Item identifiers
//!
//! Items are identified by free-form strings. Seed data may use any id
//! (e.g. `item-001`); ids generated by a store have the form
//! `{prefix}-{n}` where `n` comes from a per-store counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default prefix for generated item ids
pub const DEFAULT_ID_PREFIX: &str = "item";

/// Identifier of an item placed on a shelf
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a string as an item id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is the empty string
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Generates item ids from a monotonically increasing counter
///
/// The generator never hands out the same id twice, and callers pass a
/// predicate so ids already present in the store are skipped.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
}

impl IdGenerator {
    /// Creates a generator producing `{prefix}-1`, `{prefix}-2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Returns the next id for which `taken` is false
    pub fn next_id(&mut self, taken: impl Fn(&ItemId) -> bool) -> ItemId {
        loop {
            let candidate = ItemId(format!("{}-{}", self.prefix, self.next));
            self.next += 1;
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}
