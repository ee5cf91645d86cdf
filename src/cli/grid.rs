//! Grid rendering command

use anyhow::Result;

use super::output::Output;
use crate::domain::{ShelfItem, ShelfStore};

const OCCUPIED: &str = "■";
const EMPTY: &str = "·";

/// Glyph for one slot in the compact view
fn glyph(item: Option<&ShelfItem>, _shelf: usize, _compartment: usize) -> String {
    match item {
        Some(_) => OCCUPIED.to_string(),
        None => EMPTY.to_string(),
    }
}

/// Lays out rendered rows as text, padding cells to a common width
pub fn format_rows(rows: &[Vec<String>]) -> Vec<String> {
    let cell_width = rows
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);

    rows.iter()
        .enumerate()
        .map(|(shelf, cells)| {
            let cells: Vec<String> = cells
                .iter()
                .map(|cell| {
                    let label = if cell.is_empty() { EMPTY } else { cell.as_str() };
                    format!("{:<width$}", label, width = cell_width)
                })
                .collect();
            format!("{:>3} | {}", shelf, cells.join(" ")).trim_end().to_string()
        })
        .collect()
}

/// Render the shelf grid
pub fn show(output: &Output, store: &ShelfStore, ids: bool) -> Result<()> {
    let structure = store.structure();
    output.verbose_ctx(
        "show",
        &format!(
            "Rendering {} shelves, {} slots",
            structure.num_shelves,
            store.slots().count()
        ),
    );

    let id_rows = store.render_matrix(&|item: Option<&ShelfItem>, _: usize, _: usize| {
        item.map(|i| i.id.clone())
    });
    let data = serde_json::json!({
        "shelf": store.data().shelf.id,
        "rows": id_rows,
        "total_items": store.total_items(),
        "total_compartments": structure.total_compartments,
        "max_capacity": structure.max_capacity,
    });

    output.report(&data, || {
        let rows = if ids {
            store.render_matrix_default()
        } else {
            store.render_matrix(&glyph)
        };

        println!("Shelf {}", store.data().shelf.id);
        for line in format_rows(&rows) {
            println!("{}", line);
        }
        println!();
        println!(
            "Total: {} items in {} compartments (capacity {})",
            store.total_items(),
            structure.total_compartments,
            structure.max_capacity
        );
    });

    let hidden = store
        .get_items()
        .iter()
        .filter(|item| !structure.contains(item.location))
        .count();
    if hidden > 0 {
        output.verbose_ctx("show", &format!("{} item(s) outside the grid not shown", hidden));
    }

    Ok(())
}
