use async_trait::async_trait;

use crate::domain::{
    errors::ItemResult,
    models::{ImageUpload, Item, ItemChanges, NewItemFields},
    value_objects::ItemId,
};

/// Port for the item lifecycle service: the only component that sequences
/// cross-store operations.
///
/// No locking or transaction spans the record store and the object store.
/// Concurrent operations on the same id are unordered; last writer wins at
/// the record store, and an image swap racing a delete can leave a dangling
/// locator or an orphaned object. Best-effort by design.
#[async_trait]
pub trait ItemService: Send + Sync + 'static {
    /// All items, unordered.
    async fn list_items(&self) -> ItemResult<Vec<Item>>;

    /// The item for `id`; `ItemError::NotFound` if absent, distinct from a
    /// store failure.
    async fn get_item(&self, id: &ItemId) -> ItemResult<Item>;

    /// Validate and persist a new item, uploading the image first when one
    /// is supplied.
    async fn create_item(
        &self,
        fields: NewItemFields,
        image: Option<ImageUpload>,
    ) -> ItemResult<Item>;

    /// Apply a partial update; a new image payload replaces (and deletes)
    /// any previously stored one.
    async fn update_item(
        &self,
        id: &ItemId,
        changes: ItemChanges,
        image: Option<ImageUpload>,
    ) -> ItemResult<Item>;

    /// Remove the record and, if present, its stored image.
    async fn delete_item(&self, id: &ItemId) -> ItemResult<()>;
}
