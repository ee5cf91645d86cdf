//! Item CLI commands
//!
//! Each command applies one store operation to the seeded in-memory store
//! and prints the outcome. Nothing is written back to the seed.

use anyhow::{bail, Result};
use clap::Args;

use super::output::Output;
use crate::domain::{
    ItemId, ItemInput, ItemLocation, ItemMetadata, ItemUpdate, ShelfItem, ShelfStore,
};

/// Optional fields for `shelf add`
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Item ID (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Category (defaults to "Uncategorized")
    #[arg(long)]
    pub category: Option<String>,

    /// Quantity (defaults to 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: Option<u32>,

    /// Item width (defaults to 1)
    #[arg(long)]
    pub width: Option<f64>,

    /// Extra metadata as key=value (repeatable)
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    pub meta: Vec<String>,
}

/// Fields for `shelf update`; at least one must be given
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// New quantity
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: Option<u32>,

    /// Move to another compartment, as shelf:compartment
    #[arg(long, value_name = "SHELF:COMPARTMENT")]
    pub at: Option<ItemLocation>,

    /// New width
    #[arg(long)]
    pub width: Option<f64>,

    /// Metadata to set as key=value (repeatable)
    #[arg(long = "meta", value_name = "KEY=VALUE")]
    pub meta: Vec<String>,

    /// New item ID
    #[arg(long)]
    pub rename: Option<String>,
}

impl AddArgs {
    fn into_input(self) -> Result<ItemInput> {
        let metadata = if self.width.is_some() || !self.meta.is_empty() {
            Some(build_metadata(ItemMetadata::default(), self.width, &self.meta)?)
        } else {
            None
        };

        Ok(ItemInput {
            id: self.id.map(ItemId::from),
            category: self.category,
            quantity: self.quantity,
            metadata,
        })
    }
}

impl UpdateArgs {
    fn into_update(self, current: &ShelfItem) -> Result<ItemUpdate> {
        let metadata = if self.width.is_some() || !self.meta.is_empty() {
            Some(build_metadata(current.metadata.clone(), self.width, &self.meta)?)
        } else {
            None
        };

        Ok(ItemUpdate {
            id: self.rename.map(ItemId::from),
            category: self.category,
            quantity: self.quantity,
            location: self.at,
            metadata,
        })
    }
}

fn build_metadata(mut base: ItemMetadata, width: Option<f64>, entries: &[String]) -> Result<ItemMetadata> {
    if let Some(width) = width {
        if !(width.is_finite() && width > 0.0) {
            bail!("Width must be a positive number, got {}", width);
        }
        base.set("width", width);
    }
    for entry in entries {
        base.set_entry(entry)?;
    }
    Ok(base)
}

/// List all items
pub fn list(output: &Output, store: &ShelfStore) -> Result<()> {
    let items = store.get_items();
    output.verbose_ctx("items", &format!("Listing {} items", items.len()));

    let data = serde_json::json!({
        "items": items,
        "total_items": store.total_items(),
    });
    output.report(&data, || {
        if items.is_empty() {
            println!("No items on the shelf.");
        } else {
            print_table(items);
            println!();
            println!("Total: {}", store.total_items());
        }
    });

    Ok(())
}

/// Show the item at a location
pub fn get(output: &Output, store: &ShelfStore, at: ItemLocation) -> Result<()> {
    let item = store.get_item_by_location(at.shelf, at.compartment);

    let data = serde_json::json!({
        "location": at,
        "item": item,
    });
    output.report(&data, || match item {
        Some(item) => print_item(item),
        None => println!("Compartment {} is empty", at),
    });

    Ok(())
}

/// Place an item
pub fn add(output: &Output, store: &mut ShelfStore, at: ItemLocation, args: AddArgs) -> Result<()> {
    if !store.structure().contains(at) {
        output.verbose_ctx(
            "add",
            &format!("{} is outside the grid; the item will not be rendered", at),
        );
    }

    let replaced = store
        .get_item_by_location(at.shelf, at.compartment)
        .map(|item| item.id.clone());
    let id = store.add_item(at.shelf, at.compartment, args.into_input()?);

    if let Some(old) = &replaced {
        output.verbose_ctx("add", &format!("Replaced {} at {}", old, at));
    }

    let data = serde_json::json!({
        "item": store.get_item(&id),
        "replaced": replaced,
        "total_items": store.total_items(),
    });
    output.report(&data, || {
        println!("Added {} at {} (Total: {})", id, at, store.total_items());
        if let Some(old) = &replaced {
            println!("Replaced {}", old);
        }
    });

    Ok(())
}

/// Remove an item by id
pub fn remove(output: &Output, store: &mut ShelfStore, id: &str) -> Result<()> {
    let removed = store.remove_item(&ItemId::from(id));
    report_removal(output, store, removed, &format!("No item with id '{}'", id));
    Ok(())
}

/// Remove the occupant of a location
pub fn remove_at(output: &Output, store: &mut ShelfStore, at: ItemLocation) -> Result<()> {
    let removed = store.remove_item_by_location(at.shelf, at.compartment);
    report_removal(output, store, removed, &format!("Compartment {} is already empty", at));
    Ok(())
}

fn report_removal(output: &Output, store: &ShelfStore, removed: Option<ShelfItem>, missing: &str) {
    let data = serde_json::json!({
        "removed": removed,
        "total_items": store.total_items(),
    });
    output.report(&data, || match &removed {
        Some(item) => println!(
            "Removed {} from {} (Total: {})",
            item.id,
            item.location,
            store.total_items()
        ),
        None => println!("{}; nothing removed", missing),
    });
}

/// Update fields of an item
pub fn update(output: &Output, store: &mut ShelfStore, id: &str, args: UpdateArgs) -> Result<()> {
    let id = ItemId::from(id);

    let Some(current) = store.get_item(&id).cloned() else {
        output.report(&serde_json::json!({ "updated": false, "item": null }), || {
            println!("No item with id '{}'; nothing updated", id)
        });
        return Ok(());
    };

    let update = args.into_update(&current)?;
    if update.is_empty() {
        bail!("Nothing to update. Pass --category, --quantity, --at, --width, --meta or --rename");
    }

    let new_id = update.id.clone().unwrap_or_else(|| id.clone());
    let before = store.total_items();
    store.update_item(&id, update);

    let evicted = before - store.total_items();
    if evicted > 0 {
        output.verbose_ctx("update", &format!("Evicted {} conflicting item(s)", evicted));
    }

    let item = store.get_item(&new_id);
    let data = serde_json::json!({
        "updated": true,
        "item": item,
        "evicted": evicted,
        "total_items": store.total_items(),
    });
    output.report(&data, || {
        if let Some(item) = item {
            println!("Updated {}", id);
            print_item(item);
        }
        if evicted > 0 {
            println!();
            println!("Evicted {} conflicting item(s) (Total: {})", evicted, store.total_items());
        }
    });

    Ok(())
}

fn print_table(items: &[ShelfItem]) {
    println!(
        "{:<16} {:<10} {:<16} {:>4} {:>6}",
        "ID", "LOCATION", "CATEGORY", "QTY", "WIDTH"
    );
    println!("{}", "-".repeat(56));
    for item in items {
        println!(
            "{:<16} {:<10} {:<16} {:>4} {:>6}",
            item.id,
            item.location.to_string(),
            item.category,
            item.quantity,
            item.width()
        );
    }
}

fn print_item(item: &ShelfItem) {
    println!("ID:       {}", item.id);
    println!("Location: {}", item.location);
    println!("Category: {}", item.category);
    println!("Quantity: {}", item.quantity);
    let meta: Vec<String> = item
        .metadata
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    if !meta.is_empty() {
        println!("Metadata: {}", meta.join(", "));
    }
}
