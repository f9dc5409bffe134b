//! Query descriptor types
//!
//! A descriptor is the user's search or discovery intent. It is immutable
//! once submitted and compared by value to decide whether a fetch session
//! must be reset.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most seed genres the recommendations endpoint accepts
pub const MAX_SEEDS: usize = 5;

/// Upper bound of the popularity scale
pub const MAX_POPULARITY: u8 = 100;

/// Popularity used when the caller does not pick one
pub const DEFAULT_POPULARITY: u8 = 50;

/// What to search for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryDescriptor {
    /// Free-text album search
    Search {
        /// Search term
        term: String,
    },
    /// Seeded recommendations
    Discover {
        /// Seed genre tags, in the order the user picked them
        seeds: Vec<String>,
        /// Target popularity, 0-100
        target_popularity: u8,
    },
}

impl QueryDescriptor {
    /// Create a search descriptor (term is trimmed)
    pub fn search(term: impl Into<String>) -> Self {
        Self::Search {
            term: term.into().trim().to_string(),
        }
    }

    /// Create a discover descriptor (seeds are trimmed)
    pub fn discover<I, S>(seeds: I, target_popularity: u8) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Discover {
            seeds: seeds
                .into_iter()
                .map(|s| s.into().trim().to_string())
                .collect(),
            target_popularity,
        }
    }

    /// Reject descriptors that must never reach the network
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Search { term } => {
                if term.trim().is_empty() {
                    return Err(Error::invalid_query("search term is empty"));
                }
            }
            Self::Discover {
                seeds,
                target_popularity,
            } => {
                if seeds.is_empty() {
                    return Err(Error::invalid_query("at least one seed genre is required"));
                }
                if seeds.len() > MAX_SEEDS {
                    return Err(Error::invalid_query(format!(
                        "at most {MAX_SEEDS} seed genres are allowed, got {}",
                        seeds.len()
                    )));
                }
                if seeds.iter().any(|s| s.trim().is_empty()) {
                    return Err(Error::invalid_query("seed genres must not be empty"));
                }
                if *target_popularity > MAX_POPULARITY {
                    return Err(Error::invalid_query(format!(
                        "target popularity must be 0-{MAX_POPULARITY}, got {target_popularity}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Query parameters identifying this descriptor at the source
    ///
    /// Paging parameters are added separately by the source.
    pub fn to_params(&self) -> Vec<(String, String)> {
        match self {
            Self::Search { term } => vec![
                ("q".to_string(), term.clone()),
                ("type".to_string(), "album".to_string()),
            ],
            Self::Discover {
                seeds,
                target_popularity,
            } => vec![
                ("seed_genres".to_string(), seeds.join(",")),
                (
                    "target_popularity".to_string(),
                    target_popularity.to_string(),
                ),
            ],
        }
    }

    /// Check if this is a free-text search
    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search { .. })
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search { term } => write!(f, "search \"{term}\""),
            Self::Discover {
                seeds,
                target_popularity,
            } => write!(
                f,
                "discover [{}] @ popularity {target_popularity}",
                seeds.join(", ")
            ),
        }
    }
}
