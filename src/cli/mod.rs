//! CLI module
//!
//! Command-line consumer of the paged fetcher.
//!
//! # Commands
//!
//! - `search` - Page through album search results
//! - `discover` - Page through seeded recommendations
//! - `genres` - List available seed genres
//! - `albums` - Look up albums by id
//! - `collection` - Show a stored collection

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{retry_with_policy, Runner};
