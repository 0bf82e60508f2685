use async_trait::async_trait;

use crate::domain::{
    errors::ItemResult,
    models::{Item, ItemChanges},
    value_objects::ItemId,
};

/// Port for the record store backing item records.
///
/// The contract is storage-engine-agnostic; implementations fail with
/// `ItemError::StoreUnavailable` when the backend cannot be reached.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// All stored records, unordered.
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// The record for `id`, or `None` if absent. Absence is not an error.
    async fn get(&self, id: &ItemId) -> ItemResult<Option<Item>>;

    /// Insert or fully replace the record at `item.id`.
    async fn put(&self, item: &Item) -> ItemResult<()>;

    /// Partially overwrite the supplied fields of the record at `id`.
    /// Callers must check existence first; a missing id is a no-op.
    async fn update(&self, id: &ItemId, changes: &ItemChanges) -> ItemResult<()>;

    /// Remove the record at `id`. Idempotent.
    async fn delete(&self, id: &ItemId) -> ItemResult<()>;

    /// Startup-only connectivity probe; not part of the request hot path.
    async fn check_connectivity(&self) -> ItemResult<()>;
}
