//! Project management
//!
//! Handles project initialization and locates the project seed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::PROJECT_DIR;
use super::seed::{demo_shelf, SeedFile};
use super::Config;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a shelf project. Run 'shelf init' first.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# Shelf matrix configuration

# Seed file the store starts from, relative to this directory
seed = "shelf.json"

# Prefix for generated item ids
id_prefix = "item"

[display]
# Interactive demo refresh rate
tick_rate_ms = 250

# Width of one compartment cell in the demo
cell_width = 4

# Show item ids instead of glyphs in 'shelf show'
show_ids = false
"#;

const GITIGNORE: &str = r#"# Temp files left by interrupted seed writes
*.tmp
"#;

/// A shelf project: a directory containing `.shelf/`
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Initializes a new project at the given path
    ///
    /// Existing files are left alone, so running it twice is harmless.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let shelf_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&shelf_dir).with_context(|| {
            format!("Failed to create .shelf directory: {}", shelf_dir.display())
        })?;

        let config_path = shelf_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = shelf_dir.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(&gitignore_path, GITIGNORE).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        let project = Self::open(root)?;

        let seed = project.seed_file();
        if !seed.exists() {
            seed.write(&demo_shelf()?)?;
        }

        Ok(project)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .shelf directory path
    pub fn shelf_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the project's seed file
    pub fn seed_file(&self) -> SeedFile {
        SeedFile::new(self.shelf_dir().join(&self.config.project.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.shelf_dir().is_dir());
        assert!(project.shelf_dir().join("config.toml").is_file());
        assert!(project.shelf_dir().join(".gitignore").is_file());
        assert!(project.shelf_dir().join("shelf.json").is_file());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        Project::init(dir.path()).unwrap();
        Project::init(dir.path()).unwrap();

        assert!(dir.path().join(PROJECT_DIR).is_dir());
    }

    #[test]
    fn init_keeps_existing_seed() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let mut data = project.seed_file().read().unwrap();
        data.shelf.items.clear();
        data.shelf.structure.total_items = 0;
        project.seed_file().write(&data).unwrap();

        let project = Project::init(dir.path()).unwrap();
        assert!(project.seed_file().read().unwrap().items().is_empty());
    }

    #[test]
    fn default_config_parses() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert_eq!(project.config().project.seed, "shelf.json");
        assert_eq!(project.config().project.display.cell_width, 4);
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        let result = Project::open(dir.path());

        assert!(result.is_err());
    }

    #[test]
    fn init_honours_configured_seed_name() {
        let dir = TempDir::new().unwrap();
        let shelf_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir_all(&shelf_dir).unwrap();
        fs::write(shelf_dir.join("config.toml"), "seed = \"garage.yaml\"\n").unwrap();

        let project = Project::init(dir.path()).unwrap();

        assert!(shelf_dir.join("garage.yaml").is_file());
        assert_eq!(project.seed_file().read().unwrap().items().len(), 25);
        assert_eq!(project.config().seed_path(), Some(shelf_dir.join("garage.yaml")));
    }
}
