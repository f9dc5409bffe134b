// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Cover Arts
//!
//! Browse Spotify albums by their cover art: free-text search, seeded
//! recommendations and stored collections.
//!
//! ## Features
//!
//! - **Paged fetching**: one session per query, pages appended in order
//! - **Stale-response guard**: late pages for a replaced query are dropped
//! - **Typed errors**: local validation, auth, transient and payload faults
//! - **Rate limiting**: client-side request budget (governor)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cover_arts::{
//!     AppConfig, Authenticator, Credential, FetchEvent, HttpClient, PagedFetcher,
//!     QueryDescriptor, SessionContext, SpotifySource,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> cover_arts::Result<()> {
//!     let config = AppConfig::default();
//!     let session = SessionContext::new("user-1", Credential::new("BQD..."));
//!     let client = HttpClient::with_auth(config.http_client_config(), Authenticator::new(session))?;
//!
//!     let fetcher = PagedFetcher::new(Arc::new(SpotifySource::new(client)), &config.fetch);
//!     fetcher.handle(FetchEvent::Submit(QueryDescriptor::search("daft punk"))).await?;
//!     fetcher.handle(FetchEvent::NearBottom).await?;
//!
//!     for album in fetcher.items() {
//!         println!("{} - {}", album.artist_line(), album.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         PagedFetcher                         │
//! │  submit() / fetch_page() / load_more() → FetchOutcome        │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │  Query   │ Paginate  │    Source     │   HTTP    │   Auth    │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Search   │ Offset    │ Search        │ GET       │ Bearer    │
//! │ Discover │ Cursor    │ Recommend     │ Rate Limit│ Session   │
//! │          │ Scroll    │ Albums/Genres │ Classify  │           │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Application configuration
pub mod config;

/// Session context and bearer authentication
pub mod auth;

/// HTTP client with rate limiting and status classification
pub mod http;

/// Query descriptors
pub mod query;

/// Cursors, pages and offset pagination
pub mod pagination;

/// Upstream page sources
pub mod source;

/// Paged fetch sessions
pub mod fetcher;

/// Stored album collections
pub mod collection;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{Authenticator, Credential, SessionContext};
pub use collection::{resolve_collection, Collection, CollectionStore, JsonCollectionStore};
pub use config::AppConfig;
pub use fetcher::{FetchEvent, FetchOutcome, LoadingState, PagedFetcher, SessionSnapshot};
pub use http::HttpClient;
pub use pagination::{Cursor, Page, ScrollPosition};
pub use query::QueryDescriptor;
pub use source::{AlbumCatalog, Item, PageSource, SpotifySource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
