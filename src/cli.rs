use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "team-roster-to-sqlite")]
#[command(version, about = "Normalize a Pokemon team roster and store its type matchups in SQLite")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a roster file (CSV or JSON) as a new batch
    Import {
        /// Local path or http(s) URL of the roster
        source: String,

        /// SQLite database path
        #[arg(long, env = "ROSTER_DB")]
        db: Option<PathBuf>,

        /// Only print the batch id
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the matchup profile for one or two types
    Matchup {
        /// Primary type
        type1: String,

        /// Secondary type
        type2: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a stored batch
    Show {
        /// Batch id, as printed by `import`
        batch_id: String,

        /// SQLite database path
        #[arg(long, env = "ROSTER_DB")]
        db: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored batches
    Batches {
        /// SQLite database path
        #[arg(long, env = "ROSTER_DB")]
        db: Option<PathBuf>,
    },

    /// List all type labels
    ListTypes,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Resolve the database path, defaulting to the platform data directory
pub fn database_path(db: Option<PathBuf>) -> Result<PathBuf> {
    let path = match db {
        Some(path) => path,
        None => {
            let proj_dirs = ProjectDirs::from("", "", "team-roster-to-sqlite")
                .context("Could not determine data directory")?;
            proj_dirs.data_dir().join("roster.sqlite")
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    Ok(path)
}
