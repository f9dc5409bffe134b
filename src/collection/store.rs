//! File-backed collection store
//!
//! Reads a JSON document mapping user id to that user's collections.
//! The store is loaded once and never written.

use super::types::Collection;
use super::CollectionStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Collections keyed by user id
type CollectionIndex = HashMap<String, Vec<Collection>>;

/// Read-only collection store backed by a JSON document
#[derive(Debug, Default)]
pub struct JsonCollectionStore {
    users: CollectionIndex,
}

impl JsonCollectionStore {
    /// Create an empty store
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let store = Self::from_json(&contents).map_err(|e| {
            Error::config(format!(
                "Failed to parse collection store {}: {e}",
                path.display()
            ))
        })?;

        debug!(
            path = %path.display(),
            users = store.users.len(),
            "Loaded collection store"
        );
        Ok(store)
    }

    /// Load a store from an inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let users: CollectionIndex = serde_json::from_str(json)?;
        Ok(Self { users })
    }

    /// Build a store from collections already in memory
    pub fn from_collections(
        users: impl IntoIterator<Item = (String, Vec<Collection>)>,
    ) -> Self {
        Self {
            users: users.into_iter().collect(),
        }
    }

    /// Number of users with collections
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl CollectionStore for JsonCollectionStore {
    async fn get_collection(
        &self,
        user_id: &str,
        collection_id: &str,
    ) -> Result<Option<Collection>> {
        Ok(self
            .users
            .get(user_id)
            .and_then(|collections| collections.iter().find(|c| c.id == collection_id))
            .cloned())
    }

    async fn list_collections(&self, user_id: &str) -> Result<Vec<Collection>> {
        Ok(self.users.get(user_id).cloned().unwrap_or_default())
    }
}
