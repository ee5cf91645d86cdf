//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::domain::{
    context, ItemInput, ItemLocation, ItemMetadata, ItemUpdate, MatrixHandle, ShelfItem,
};

/// Category given to items added from the viewer
const ADDED_CATEGORY: &str = "Books";

/// Application state
pub struct App {
    /// Store shown by the viewer
    matrix: MatrixHandle,

    /// Selected compartment, always inside the declared grid
    cursor: ItemLocation,

    /// Columns per unit of item width
    cell_width: u16,

    /// Show the key help panel
    show_help: bool,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    pub fn new(matrix: MatrixHandle, cell_width: u16) -> Self {
        Self {
            matrix,
            cursor: ItemLocation::new(0, 0),
            cell_width: cell_width.max(1),
            show_help: false,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    ///
    /// The store is provided as the matrix context for the whole loop, so
    /// slot views can reach it while handling input.
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        let matrix = self.matrix.clone();
        context::provide(matrix, || self.event_loop(terminal, events))
    }

    fn event_loop(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        views::matrix::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }

            // Navigation
            KeyCode::Char('h') | KeyCode::Left => self.move_compartment(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_compartment(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_shelf(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_shelf(1),
            KeyCode::Home => self.cursor.compartment = 0,
            KeyCode::End => {
                let count = self.compartments_on(self.cursor.shelf);
                self.cursor.compartment = count.saturating_sub(1);
            }

            // Actions
            KeyCode::Char('a') | KeyCode::Enter => self.add_at_cursor(),
            KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
                self.remove_at_cursor()?
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_quantity(1),
            KeyCode::Char('-') => self.adjust_quantity(-1),

            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }

        Ok(())
    }

    fn compartments_on(&self, shelf: usize) -> usize {
        self.matrix
            .read(|store| store.structure().compartments(shelf).unwrap_or(0))
    }

    fn shelf_count(&self) -> usize {
        self.matrix
            .read(|store| store.structure().compartments_per_shelf.len())
    }

    fn move_compartment(&mut self, delta: isize) {
        let count = self.compartments_on(self.cursor.shelf);
        self.cursor.compartment = step(self.cursor.compartment, delta, count);
    }

    /// Moves between shelves, clamping the compartment to the new shelf
    fn move_shelf(&mut self, delta: isize) {
        self.cursor.shelf = step(self.cursor.shelf, delta, self.shelf_count());
        let count = self.compartments_on(self.cursor.shelf);
        self.cursor.compartment = self.cursor.compartment.min(count.saturating_sub(1));
    }

    fn cursor_in_grid(&self) -> bool {
        self.matrix.read(|store| store.structure().contains(self.cursor))
    }

    fn add_at_cursor(&mut self) {
        if !self.cursor_in_grid() {
            self.status_message = Some("This shelf has no compartments".to_string());
            return;
        }

        let input = ItemInput::new()
            .category(ADDED_CATEGORY)
            .quantity(1)
            .metadata(ItemMetadata::with_width(1.0));
        let id = self
            .matrix
            .add_item(self.cursor.shelf, self.cursor.compartment, input);

        self.status_message = Some(format!("Added {} at {}", id, self.cursor));
    }

    fn remove_at_cursor(&mut self) -> Result<()> {
        let removed = views::slot::remove_at(self.cursor)?;

        self.status_message = Some(match removed {
            Some(item) => format!("Removed {} from {}", item.id, self.cursor),
            None => format!("{} is already empty", self.cursor),
        });

        Ok(())
    }

    fn adjust_quantity(&mut self, delta: i64) {
        let Some(item) = self.selected_item() else {
            self.status_message = Some(format!("{} is empty", self.cursor));
            return;
        };

        let quantity = (i64::from(item.quantity) + delta).clamp(1, i64::from(u32::MAX)) as u32;
        self.matrix
            .update_item(&item.id, ItemUpdate::new().quantity(quantity));

        self.status_message = Some(format!("{} quantity: {}", item.id, quantity));
    }

    pub fn matrix(&self) -> &MatrixHandle {
        &self.matrix
    }

    pub fn cursor(&self) -> ItemLocation {
        self.cursor
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn selected_item(&self) -> Option<ShelfItem> {
        self.matrix
            .get_item_by_location(self.cursor.shelf, self.cursor.compartment)
    }
}

/// Moves `index` by `delta`, staying within `0..count`
fn step(index: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContextError, ItemId, ShelfData};

    fn app() -> App {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        let data = ShelfData::new("tui", created, vec![4, 16, 0, 2], 22);
        App::new(MatrixHandle::from_data(data), 4)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn step_clamps() {
        assert_eq!(step(0, -1, 4), 0);
        assert_eq!(step(3, 1, 4), 3);
        assert_eq!(step(1, 1, 4), 2);
        assert_eq!(step(5, 0, 0), 0);
    }

    #[test]
    fn cursor_stays_in_grid() {
        let mut app = app();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::End);
        assert_eq!(app.cursor(), ItemLocation::new(1, 15));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor(), ItemLocation::new(0, 3));

        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        // The empty shelf on the way resets the compartment
        assert_eq!(app.cursor(), ItemLocation::new(3, 0));
    }

    #[test]
    fn add_places_books_at_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('a'));

        let item = app.selected_item().unwrap();
        assert_eq!(item.category, "Books");
        assert_eq!(item.location, ItemLocation::new(0, 1));
        assert_eq!(app.matrix().total_items(), 1);
        assert!(app.status_message().unwrap().starts_with("Added"));
    }

    #[test]
    fn add_on_shelf_without_compartments_is_refused() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor(), ItemLocation::new(2, 0));

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.matrix().total_items(), 0);
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.selected_item().unwrap().quantity, 3);

        for _ in 0..5 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.selected_item().unwrap().quantity, 1);
    }

    #[test]
    fn remove_goes_through_matrix_context() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        let id: ItemId = app.selected_item().unwrap().id;

        let matrix = app.matrix().clone();
        context::provide(matrix, || press(&mut app, KeyCode::Char('x')));

        assert!(app.selected_item().is_none());
        assert_eq!(app.matrix().total_items(), 0);
        assert!(app.status_message().unwrap().contains(id.as_str()));
    }

    #[test]
    fn remove_outside_context_fails_loudly() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));

        let err = app
            .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ContextError>(), Some(&ContextError::Uninitialized));
        assert_eq!(app.matrix().total_items(), 1);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help());

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help());
        assert!(!app.should_quit);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
    }
}
