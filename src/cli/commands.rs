//! CLI commands and argument parsing

use crate::query::DEFAULT_POPULARITY;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse Spotify album covers from the terminal
#[derive(Parser, Debug)]
#[command(name = "cover-arts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Bearer token from the Spotify OAuth session
    #[arg(
        short,
        long,
        global = true,
        env = "SPOTIFY_ACCESS_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Retries of a temporarily unavailable source (overrides config)
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search albums by free text
    Search {
        /// Search term
        term: String,

        /// Pages to load before stopping
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },

    /// Recommend albums from seed genres
    Discover {
        /// Seed genre (repeatable, up to 5)
        #[arg(short, long = "seed", required = true)]
        seeds: Vec<String>,

        /// Target popularity, 0-100
        #[arg(long, default_value_t = DEFAULT_POPULARITY)]
        popularity: u8,

        /// Pages to load before stopping
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },

    /// List genres usable as discovery seeds
    Genres,

    /// Look up albums by id
    Albums {
        /// Album ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },

    /// Show a stored collection with its albums
    Collection {
        /// Collection id
        id: String,

        /// Owner of the collection
        #[arg(short, long)]
        user: String,

        /// Collection store file (JSON)
        #[arg(short, long)]
        store: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
