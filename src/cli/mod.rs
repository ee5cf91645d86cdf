//! # Command-Line Interface
//!
//! User-facing commands over a shelf seed and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init` |
//! | Grid | Shelf layout | `show`, `show --ids` |
//! | Items | Item lookup and edits | `items`, `get`, `add`, `remove`, `remove-at`, `update` |
//! | Viewer | Interactive grid | `tui` |
//!
//! Edits apply to the loaded shelf for the length of one command; the seed
//! file on disk is never rewritten.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! shelf --verbose items
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod grid;
mod item;
mod output;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
