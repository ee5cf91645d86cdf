//! Interactive shelf viewer
//!
//! Draws the shelf grid in the terminal using ratatui and lets the user
//! add, remove and adjust items at a cursor.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::{MatrixHandle, ShelfStore};
use crate::storage::DisplayConfig;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, store: ShelfStore, display: &DisplayConfig) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let matrix = MatrixHandle::new(store);
    let mut app = App::new(matrix.clone(), display.cell_width);

    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(Duration::from_millis(display.tick_rate_ms));

    // The terminal must be restored even if drawing panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, &events)));
    let restored = ui::restore_terminal();

    let outcome = result.map_err(|payload| anyhow!("TUI panicked: {}", panic_message(&*payload)))?;
    restored?;
    outcome?;

    output.verbose_ctx(
        "tui",
        &format!("Closed with {} items on the shelf", matrix.total_items()),
    );
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown error"
    }
}
