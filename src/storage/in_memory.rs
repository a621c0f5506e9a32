//! In-memory implementation of ItemSource for testing and development

use crate::core::{ItemSource, Record};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory item source
///
/// Items are listed in insertion order. Uses RwLock for thread-safe access,
/// so clones share the same collection.
#[derive(Clone)]
pub struct InMemoryItemSource<T> {
    items: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Record + Clone> InMemoryItemSource<T> {
    /// Create an empty source
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Create a source seeded with `items`
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let items = items.into_iter().map(|item| (item.id(), item)).collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Insert or replace an item, keeping its original position on replace
    pub fn insert(&self, item: T) -> Result<T> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.insert(item.id(), item.clone());

        Ok(item)
    }

    pub fn update(&self, id: &Uuid, item: T) -> Result<T> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = items.get_mut(id).ok_or_else(|| anyhow!("Item not found"))?;
        *slot = item.clone();

        Ok(item)
    }

    /// Remove an item, preserving the order of the others
    pub fn remove(&self, id: &Uuid) -> Result<Option<T>> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(items.shift_remove(id))
    }

    pub fn len(&self) -> Result<usize> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T: Record + Clone> Default for InMemoryItemSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record + Clone + 'static> ItemSource<T> for InMemoryItemSource<T> {
    async fn list(&self) -> Result<Vec<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.values().cloned().collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Item;

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let source = InMemoryItemSource::new();
        source.insert(Item::new("Zeta", 1.0)).unwrap();
        source.insert(Item::new("Alpha", 2.0)).unwrap();

        let names: Vec<_> = source
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn test_get_update_remove() {
        let item = Item::new("Daypack", 40.0);
        let id = item.id;
        let source = InMemoryItemSource::from_items([item.clone()]);

        assert_eq!(source.get(&id).await.unwrap(), Some(item.clone()));

        let updated = Item {
            price: 35.0,
            ..item
        };
        source.update(&id, updated).unwrap();
        assert_eq!(source.get(&id).await.unwrap().unwrap().price, 35.0);

        assert!(source.remove(&id).unwrap().is_some());
        assert!(source.get(&id).await.unwrap().is_none());
        assert!(source.is_empty().unwrap());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let source = InMemoryItemSource::from_items([Item::new("Daypack", 40.0)]);
        assert_eq!(source.len().unwrap(), 1);

        let shared = source.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.items.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(source.len().is_err());
        assert!(source.insert(Item::new("Wallet", 15.0)).is_err());
    }

    #[tokio::test]
    async fn test_update_missing_item_fails() {
        let source = InMemoryItemSource::<Item>::new();
        let item = Item::new("Ghost", 1.0);
        assert!(source.update(&item.id, item.clone()).is_err());
    }
}
