//! Service trait for the data-fetch collaborator

use crate::core::Record;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Source of already-materialized item collections
///
/// The engine never fetches on its own: a screen asks its source for a
/// snapshot and hands it to a [`CollectionView`](crate::core::CollectionView).
/// Network and persistence concerns live entirely behind this trait.
#[async_trait]
pub trait ItemSource<T: Record + 'static>: Send + Sync {
    /// List every item, in the source's natural order
    async fn list(&self) -> Result<Vec<T>>;

    /// Get a single item by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;
}
