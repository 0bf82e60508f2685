use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    domain::{
        errors::{ItemError, ItemResult},
        models::{ImageUpload, Item, ItemChanges, NewItemFields},
        value_objects::ItemId,
    },
    ports::{repositories::ItemRepository, services::ItemService, storage::ImageStore},
};

/// Implementation of the item lifecycle service.
///
/// Holds the two store adapters injected once at startup and sequences every
/// cross-store operation. There is no transaction spanning the stores: a
/// record write failing after an image upload leaves the object orphaned,
/// which is accepted and logged rather than reconciled.
#[derive(Clone)]
pub struct ItemServiceImpl {
    repository: Arc<dyn ItemRepository>,
    images: Arc<dyn ImageStore>,
}

impl ItemServiceImpl {
    pub fn new(repository: Arc<dyn ItemRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repository, images }
    }

    /// Derive a collision-resistant object name from the original filename.
    fn derive_object_name(file_name: &str) -> String {
        format!("{}-{}", Uuid::new_v4(), file_name)
    }
}

#[async_trait]
impl ItemService for ItemServiceImpl {
    async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    async fn get_item(&self, id: &ItemId) -> ItemResult<Item> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| ItemError::NotFound { id: id.clone() })
    }

    async fn create_item(
        &self,
        fields: NewItemFields,
        image: Option<ImageUpload>,
    ) -> ItemResult<Item> {
        let mut item = Item::create(fields);
        item.normalize();
        // Fields are validated before the upload so a rejected item never
        // leaves an orphaned object behind.
        item.validate()?;

        if let Some(image) = image {
            let name = Self::derive_object_name(&image.file_name);
            let locator = self
                .images
                .put_image(image.data, &name, &image.content_type)
                .await?;
            debug!(item_id = %item.id, locator = %locator, "stored item image");
            item.image_locator = Some(locator);
        }

        self.repository.put(&item).await?;
        info!(item_id = %item.id, "created item");

        Ok(item)
    }

    async fn update_item(
        &self,
        id: &ItemId,
        changes: ItemChanges,
        image: Option<ImageUpload>,
    ) -> ItemResult<Item> {
        let mut item = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| ItemError::NotFound { id: id.clone() })?;

        let mut changes = changes;
        if let Some(image) = image {
            // Swap: the stale object goes first, then the new payload is
            // uploaded and its locator takes the old one's place.
            if let Some(old_locator) = &item.image_locator {
                self.images.delete_image(old_locator).await?;
                debug!(item_id = %id, locator = %old_locator, "deleted replaced item image");
            }
            let name = Self::derive_object_name(&image.file_name);
            let locator = self
                .images
                .put_image(image.data, &name, &image.content_type)
                .await?;
            changes.image_locator = Some(locator);
        }

        item.apply_update(changes);
        item.normalize();
        item.validate()?;

        // Full replace so the stored record matches the validated item
        // exactly.
        self.repository.put(&item).await?;
        info!(item_id = %id, "updated item");

        Ok(item)
    }

    async fn delete_item(&self, id: &ItemId) -> ItemResult<()> {
        let item = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| ItemError::NotFound { id: id.clone() })?;

        if let Some(locator) = &item.image_locator {
            // Already-deleted objects are tolerated by the adapter.
            self.images.delete_image(locator).await?;
            debug!(item_id = %id, locator = %locator, "deleted item image");
        }

        self.repository.delete(id).await?;
        info!(item_id = %id, "deleted item");

        Ok(())
    }
}
