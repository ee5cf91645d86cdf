//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{grid, item, tui};
use crate::domain::{ItemLocation, ShelfData, ShelfStore};
use crate::storage::{demo_shelf, Config, Project, SeedFile};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "A grid of shelves and compartments, held in memory")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Seed file to start from instead of the project seed
    #[arg(long, short = 's', global = true, env = "SHELF_SEED")]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new shelf project with the demo bookshelf
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Render the shelf grid
    Show {
        /// Show item ids instead of glyphs
        #[arg(long)]
        ids: bool,
    },

    /// List all placed items
    Items,

    /// Show the item in a compartment
    Get {
        /// Shelf index (zero-based)
        shelf: usize,

        /// Compartment index (zero-based)
        compartment: usize,
    },

    /// Place an item in a compartment, replacing any occupant
    ///
    /// Examples:
    ///   shelf add 0 3                           # Defaults for every field
    ///   shelf add 1 4 --category Books --width 1.5
    ///   shelf add 2 0 --id atlas --meta signed=true
    Add {
        /// Shelf index (zero-based)
        shelf: usize,

        /// Compartment index (zero-based)
        compartment: usize,

        #[command(flatten)]
        fields: item::AddArgs,
    },

    /// Remove an item by id
    Remove {
        /// Item ID
        id: String,
    },

    /// Remove whatever occupies a compartment
    RemoveAt {
        /// Shelf index (zero-based)
        shelf: usize,

        /// Compartment index (zero-based)
        compartment: usize,
    },

    /// Update fields of an item
    Update {
        /// Item ID
        id: String,

        #[command(flatten)]
        fields: item::UpdateArgs,
    },

    /// Open the interactive shelf viewer
    Tui,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("Shelf matrix starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Seed written to: {}", project.seed_file().path().display()),
            );
            output.success(&format!(
                "Initialized shelf project at {}",
                project.root().display()
            ));
        }

        Commands::Show { ids } => {
            let store = load_store(&output, &config, cli.seed.as_deref())?;
            grid::show(&output, &store, ids || config.project.display.show_ids)?
        }

        Commands::Items => {
            let store = load_store(&output, &config, cli.seed.as_deref())?;
            item::list(&output, &store)?
        }

        Commands::Get { shelf, compartment } => {
            let store = load_store(&output, &config, cli.seed.as_deref())?;
            item::get(&output, &store, ItemLocation::new(shelf, compartment))?
        }

        Commands::Add { shelf, compartment, fields } => {
            let mut store = load_store(&output, &config, cli.seed.as_deref())?;
            item::add(&output, &mut store, ItemLocation::new(shelf, compartment), fields)?
        }

        Commands::Remove { id } => {
            let mut store = load_store(&output, &config, cli.seed.as_deref())?;
            item::remove(&output, &mut store, &id)?
        }

        Commands::RemoveAt { shelf, compartment } => {
            let mut store = load_store(&output, &config, cli.seed.as_deref())?;
            item::remove_at(&output, &mut store, ItemLocation::new(shelf, compartment))?
        }

        Commands::Update { id, fields } => {
            let mut store = load_store(&output, &config, cli.seed.as_deref())?;
            item::update(&output, &mut store, &id, fields)?
        }

        Commands::Tui => {
            let store = load_store(&output, &config, cli.seed.as_deref())?;
            tui::run(&output, store, &config.project.display)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Builds the store a command works on
///
/// The seed comes from `--seed`, then the current project, then the bundled
/// demo shelf.
fn load_store(output: &Output, config: &Config, seed: Option<&Path>) -> Result<ShelfStore> {
    let prefix = config.project.id_prefix.as_str();

    let data = match (seed, config.seed_path()) {
        (Some(path), _) => {
            output.verbose_ctx("seed", &format!("Reading seed: {}", path.display()));
            SeedFile::new(path).read()?
        }
        (None, Some(path)) => {
            output.verbose_ctx("seed", &format!("Reading project seed: {}", path.display()));
            SeedFile::new(path).read()?
        }
        (None, None) => {
            output.verbose_ctx("seed", "Not in a shelf project, using the demo bookshelf");
            demo_shelf()?
        }
    };

    report_seed(output, &data);
    Ok(ShelfStore::with_id_prefix(data, prefix))
}

fn report_seed(output: &Output, data: &ShelfData) {
    let structure = data.structure();
    output.verbose_ctx(
        "seed",
        &format!(
            "Shelf {}: {} shelves, {} compartments, {} items",
            data.shelf.id,
            structure.num_shelves,
            structure.total_compartments,
            data.items().len()
        ),
    );

    for warning in data.validate() {
        output.verbose_ctx("seed", &format!("warning: {}", warning));
    }
}
