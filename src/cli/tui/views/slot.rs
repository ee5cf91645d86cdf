//! Slot view: one compartment of the grid

use ratatui::prelude::*;

use crate::cli::tui::utils::{cell_columns, fit_label, item_color};
use crate::domain::{context, ContextError, ItemLocation, ShelfItem, SlotPresenter};

/// Presents slots as coloured spans, highlighting the cursor
pub struct SlotView {
    pub cursor: ItemLocation,
    pub cell_width: u16,
}

impl SlotView {
    fn label(item: &ShelfItem) -> String {
        if item.quantity > 1 {
            format!("x{}", item.quantity)
        } else {
            String::new()
        }
    }
}

impl SlotPresenter for SlotView {
    type Output = Span<'static>;

    fn present(&self, item: Option<&ShelfItem>, shelf: usize, compartment: usize) -> Span<'static> {
        let span = match item {
            Some(item) => {
                let columns = cell_columns(self.cell_width, item.width());
                Span::styled(
                    fit_label(&Self::label(item), columns),
                    Style::default().bg(item_color(item.id.as_str())).fg(Color::Black),
                )
            }
            None => Span::styled(
                fit_label("·", usize::from(self.cell_width)),
                Style::default().fg(Color::DarkGray),
            ),
        };

        if self.cursor.is_at(shelf, compartment) {
            span.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            span
        }
    }
}

/// Removes whatever occupies `location` in the provided matrix
pub fn remove_at(location: ItemLocation) -> Result<Option<ShelfItem>, ContextError> {
    let matrix = context::use_matrix()?;
    Ok(matrix.remove_item_by_location(location.shelf, location.compartment))
}
