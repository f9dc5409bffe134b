//! Source payloads and the normalized item
//!
//! The wire structs mirror only the fields we read from the Spotify Web
//! API. Anything missing that we require (an album id, the items array)
//! fails deserialization and surfaces as `MalformedResponse`.

use serde::{Deserialize, Serialize};

/// A normalized album, ready for display and selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable album id
    pub id: String,
    /// Album title
    pub name: String,
    /// Artist names, in credit order
    pub artists: Vec<String>,
    /// Release date as the source reports it (year, month or day precision)
    pub release_date: String,
    /// Spotify URI
    pub uri: String,
    /// Medium-size cover (second image, falling back to the first)
    pub image_url: Option<String>,
    /// Largest cover (first image)
    pub large_image_url: Option<String>,
    /// Link to open the album on Spotify
    pub spotify_url: Option<String>,
}

impl Item {
    /// Artist names joined for display
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    pub albums: AlbumPage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumPage {
    pub items: Vec<AlbumObject>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecommendationsResponse {
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TrackObject {
    #[serde(default)]
    pub album: Option<AlbumObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SeveralAlbumsResponse {
    pub albums: Vec<Option<AlbumObject>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenreSeedsResponse {
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AlbumObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageObject {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ArtistObject {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

impl AlbumObject {
    /// Whether the album has a medium-size cover
    pub fn has_medium_cover(&self) -> bool {
        self.images.len() > 1
    }
}

impl From<AlbumObject> for Item {
    fn from(album: AlbumObject) -> Self {
        let large_image_url = album.images.first().map(|i| i.url.clone());
        let image_url = album
            .images
            .get(1)
            .map(|i| i.url.clone())
            .or_else(|| large_image_url.clone());

        Self {
            id: album.id,
            name: album.name,
            artists: album.artists.into_iter().map(|a| a.name).collect(),
            release_date: album.release_date,
            uri: album.uri,
            image_url,
            large_image_url,
            spotify_url: album.external_urls.and_then(|u| u.spotify),
        }
    }
}
