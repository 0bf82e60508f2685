use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::ItemResult,
        models::{Item, ItemChanges},
        value_objects::ItemId,
    },
    ports::repositories::ItemRepository,
};

/// In-memory implementation of ItemRepository for testing and development.
#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    records: Arc<RwLock<HashMap<ItemId, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, id: &ItemId) -> ItemResult<Option<Item>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn put(&self, item: &Item) -> ItemResult<()> {
        let mut records = self.records.write().await;
        records.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update(&self, id: &ItemId, changes: &ItemChanges) -> ItemResult<()> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(id) {
            record.apply_update(changes.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> ItemResult<()> {
        let mut records = self.records.write().await;
        records.remove(id);
        Ok(())
    }

    async fn check_connectivity(&self) -> ItemResult<()> {
        Ok(())
    }
}
