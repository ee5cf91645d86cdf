//! Seed files
//!
//! A seed file holds the [`ShelfData`] a store starts from, as JSON
//! (`.json`) or YAML (`.yaml`, `.yml`). Reads take a shared lock; writes
//! take an exclusive lock and go through a temp file plus rename.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use thiserror::Error;

use crate::domain::ShelfData;

/// The bundled demo shelf: 5 shelves, 51 compartments, 25 books
const DEMO_SEED: &str = include_str!("../../demos/bookshelf.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Unsupported seed format '{0}': expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    #[error("Seed file not found: {0}")]
    NotFound(PathBuf),
}

/// Serialization format of a seed file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    Json,
    Yaml,
}

impl SeedFormat {
    /// Picks the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SeedFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(SeedFormat::Yaml)
            }
            _ => Err(SeedError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn parse(self, content: &str) -> Result<ShelfData> {
        match self {
            SeedFormat::Json => serde_json::from_str(content).context("Failed to parse JSON seed"),
            SeedFormat::Yaml => serde_yaml::from_str(content).context("Failed to parse YAML seed"),
        }
    }

    pub fn render(self, data: &ShelfData) -> Result<String> {
        match self {
            SeedFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(data).context("Failed to serialize seed")?;
                json.push('\n');
                Ok(json)
            }
            SeedFormat::Yaml => serde_yaml::to_string(data).context("Failed to serialize seed"),
        }
    }
}

/// A seed file on disk
pub struct SeedFile {
    path: PathBuf,
}

impl SeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the shelf data from the file
    pub fn read(&self) -> Result<ShelfData> {
        let format = SeedFormat::from_path(&self.path)?;

        if !self.path.exists() {
            return Err(SeedError::NotFound(self.path.clone()).into());
        }

        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open seed file: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on seed file")?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read seed file: {}", self.path.display()))?;

        format
            .parse(&content)
            .with_context(|| format!("Invalid seed file: {}", self.path.display()))
    }

    /// Writes shelf data to the file, replacing it atomically
    pub fn write(&self, data: &ShelfData) -> Result<()> {
        let format = SeedFormat::from_path(&self.path)?;
        let content = format.render(data)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on seed file")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(content.as_bytes())
                .context("Failed to write seed file")?;
            writer.flush().context("Failed to flush seed file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

/// Returns the bundled demo shelf
pub fn demo_shelf() -> Result<ShelfData> {
    SeedFormat::Json
        .parse(DEMO_SEED)
        .context("Bundled demo seed is invalid")
}
