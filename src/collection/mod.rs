//! Album collections
//!
//! Collections live in an external document store keyed by
//! `(user_id, collection_id)`. This crate only reads them and resolves
//! their album ids into displayable items through the catalog.

mod store;
mod types;

pub use store::JsonCollectionStore;
pub use types::{AlbumRef, Collection};

use crate::auth::SessionContext;
use crate::error::{Error, Result};
use crate::source::{AlbumCatalog, Item};
use async_trait::async_trait;
use tracing::{debug, info};

/// Read-only access to stored collections
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Look up one collection of a user
    async fn get_collection(
        &self,
        user_id: &str,
        collection_id: &str,
    ) -> Result<Option<Collection>>;

    /// All collections of a user, in stored order
    async fn list_collections(&self, user_id: &str) -> Result<Vec<Collection>>;
}

/// Load a collection for the session's user and resolve its albums
///
/// Albums the catalog no longer knows are left out; the rest keep
/// collection order.
pub async fn resolve_collection(
    store: &dyn CollectionStore,
    catalog: &dyn AlbumCatalog,
    ctx: &SessionContext,
    collection_id: &str,
) -> Result<(Collection, Vec<Item>)> {
    if !ctx.is_usable() {
        return Err(Error::unauthorized(
            "session has no usable credential for this user",
        ));
    }

    let collection = store
        .get_collection(&ctx.user_id, collection_id)
        .await?
        .ok_or_else(|| Error::CollectionNotFound {
            user_id: ctx.user_id.clone(),
            collection_id: collection_id.to_string(),
        })?;

    if collection.is_empty() {
        debug!(collection = %collection.id, "Collection is empty");
        return Ok((collection, Vec::new()));
    }

    let items = catalog.several_albums(&collection.album_ids()).await?;
    info!(
        collection = %collection.id,
        stored = collection.len(),
        resolved = items.len(),
        "Resolved collection"
    );

    Ok((collection, items))
}
