//! # Storage Layer
//!
//! Seed and configuration files for the shelf matrix. Stores live in memory;
//! nothing here writes a store's state back.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Seed | JSON or YAML | `.shelf/shelf.json` (configurable) |
//! | Config | TOML | `.shelf/config.toml` |
//! | Global config | TOML | platform config dir, `config.toml` |
//!
//! ## Project Structure
//!
//! ```text
//! .shelf/
//! ├── shelf.json        # Seed data (demo bookshelf after `shelf init`)
//! ├── config.toml       # Project configuration
//! └── .gitignore
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for a shelf project
//! - [`SeedFile`] - Read/write seed data with file locking
//! - [`Config`] - Project and global configuration

mod config;
mod project;
mod seed;

pub use config::{Config, ConfigError, DisplayConfig, GlobalConfig, ProjectConfig, PROJECT_DIR};
pub use config::OutputFormat as DefaultFormat;
pub use project::{Project, ProjectError};
pub use seed::{demo_shelf, SeedError, SeedFile, SeedFormat};
