//! Collection document types
//!
//! Field names follow the documents as they are stored (camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, user-owned list of albums
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Collection id, unique per user
    pub id: String,
    /// Display name
    #[serde(rename = "collectionName", alias = "name")]
    pub name: String,
    /// When the collection was created
    pub created_at: DateTime<Utc>,
    /// Albums in the order they were added
    #[serde(default)]
    pub albums: Vec<AlbumRef>,
}

impl Collection {
    /// Album ids in collection order
    pub fn album_ids(&self) -> Vec<String> {
        self.albums.iter().map(|a| a.album_id.clone()).collect()
    }

    /// Number of albums
    pub fn len(&self) -> usize {
        self.albums.len()
    }

    /// Check if the collection holds no albums
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

/// Reference to an album stored in a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRef {
    /// Spotify album id
    pub album_id: String,
}

impl AlbumRef {
    /// Create an album reference
    pub fn new(album_id: impl Into<String>) -> Self {
        Self {
            album_id: album_id.into(),
        }
    }
}
