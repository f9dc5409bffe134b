//! Upstream data sources
//!
//! `PageSource` is the seam between the fetcher and whatever serves pages;
//! `AlbumCatalog` covers the non-paged catalog reads (genre seeds, albums
//! by id). `SpotifySource` implements both over the Spotify Web API.

mod spotify;
mod types;

pub use spotify::{SpotifySource, ALBUMS_PER_REQUEST};
pub use types::Item;

use crate::error::Result;
use crate::pagination::{Cursor, RawPage};
use crate::query::QueryDescriptor;
use async_trait::async_trait;

/// Which page to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Where the page starts (first page if absent)
    pub cursor: Option<Cursor>,
    /// Items per page
    pub limit: u32,
}

impl PageRequest {
    /// Create a page request
    pub fn new(cursor: Option<Cursor>, limit: u32) -> Self {
        Self { cursor, limit }
    }

    /// Offset the request starts at
    pub fn offset(&self) -> u32 {
        self.cursor.map_or(0, Cursor::offset)
    }
}

/// A paged data source
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Issue exactly one request for one page of items
    async fn fetch_page(
        &self,
        descriptor: &QueryDescriptor,
        request: PageRequest,
    ) -> Result<RawPage<Item>>;
}

/// Catalog lookups that are not paged
#[async_trait]
pub trait AlbumCatalog: Send + Sync {
    /// Genre names usable as discovery seeds
    async fn available_genre_seeds(&self) -> Result<Vec<String>>;

    /// Albums by id, in the order requested; unknown ids are skipped
    async fn several_albums(&self, ids: &[String]) -> Result<Vec<Item>>;
}
