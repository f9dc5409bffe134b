//! Spotify Web API source
//!
//! Search (`/v1/search`) returns a paging envelope with a `next` link.
//! Recommendations (`/v1/recommendations`) return a bare track list, so the
//! end of results is inferred from a short page.

use super::types::{
    GenreSeedsResponse, Item, RecommendationsResponse, SearchResponse, SeveralAlbumsResponse,
};
use super::{AlbumCatalog, PageRequest, PageSource};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{OffsetPaginator, RawPage};
use crate::query::QueryDescriptor;
use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::debug;

/// Most ids the several-albums endpoint accepts per request
pub const ALBUMS_PER_REQUEST: usize = 20;

const SEARCH_PATH: &str = "/v1/search";
const RECOMMENDATIONS_PATH: &str = "/v1/recommendations";
const GENRE_SEEDS_PATH: &str = "/v1/recommendations/available-genre-seeds";
const ALBUMS_PATH: &str = "/v1/albums";

/// Page source backed by the Spotify Web API
#[derive(Debug)]
pub struct SpotifySource {
    client: HttpClient,
    market: Option<String>,
}

impl SpotifySource {
    /// Create a source over an authenticated client
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            market: None,
        }
    }

    /// Restrict results to a market (ISO country code)
    #[must_use]
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request_config(&self, descriptor: &QueryDescriptor, request: PageRequest) -> RequestConfig {
        let paging = OffsetPaginator::new(request.limit).params(request.cursor);

        descriptor
            .to_params()
            .into_iter()
            .chain(paging)
            .fold(RequestConfig::new(), |config, (key, value)| {
                config.query(key, value)
            })
            .query_opt("market", self.market.clone())
    }

    async fn search(&self, config: RequestConfig) -> Result<RawPage<Item>> {
        let response: SearchResponse = self.client.get_json_with_config(SEARCH_PATH, config).await?;
        let has_more = response.albums.next.is_some();
        let items = response.albums.items.into_iter().map(Item::from).collect();

        Ok(RawPage::with_next(items, has_more))
    }

    async fn recommendations(
        &self,
        config: RequestConfig,
        limit: u32,
    ) -> Result<RawPage<Item>> {
        let response: RecommendationsResponse = self
            .client
            .get_json_with_config(RECOMMENDATIONS_PATH, config)
            .await?;

        let track_count = response.tracks.len();
        let items: Vec<Item> = response
            .tracks
            .into_iter()
            .filter_map(|track| track.album)
            .filter(|album| album.has_medium_cover())
            .map(Item::from)
            .collect();

        debug!(
            tracks = track_count,
            albums = items.len(),
            "Filtered recommendation tracks"
        );

        // No paging envelope: a full page of tracks means there may be more.
        Ok(RawPage::with_next(items, track_count >= limit as usize).consumed(track_count))
    }
}

#[async_trait]
impl PageSource for SpotifySource {
    async fn fetch_page(
        &self,
        descriptor: &QueryDescriptor,
        request: PageRequest,
    ) -> Result<RawPage<Item>> {
        let config = self.request_config(descriptor, request);
        debug!(%descriptor, offset = request.offset(), limit = request.limit, "Fetching page");

        match descriptor {
            QueryDescriptor::Search { .. } => self.search(config).await,
            QueryDescriptor::Discover { .. } => self.recommendations(config, request.limit).await,
        }
    }
}

#[async_trait]
impl AlbumCatalog for SpotifySource {
    async fn available_genre_seeds(&self) -> Result<Vec<String>> {
        let response: GenreSeedsResponse = self.client.get_json(GENRE_SEEDS_PATH).await?;
        Ok(response.genres)
    }

    async fn several_albums(&self, ids: &[String]) -> Result<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let requests = ids.chunks(ALBUMS_PER_REQUEST).map(|chunk| {
            let config = RequestConfig::new()
                .query("ids", chunk.join(","))
                .query_opt("market", self.market.clone());
            self.client
                .get_json_with_config::<SeveralAlbumsResponse>(ALBUMS_PATH, config)
        });

        let responses = try_join_all(requests).await?;

        Ok(responses
            .into_iter()
            .flat_map(|response| response.albums)
            .flatten()
            .map(Item::from)
            .collect())
    }
}
