use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{errors::ItemResult, value_objects::ImageLocator};

/// Port for the binary object store holding image payloads.
///
/// Objects are keyed by a name derived at upload time; the returned locator
/// is a stable, publicly dereferenceable URL that can be parsed back into
/// the storage key for deletion.
#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    /// Store the payload under a key derived from `name` and return its
    /// locator.
    async fn put_image(
        &self,
        data: Bytes,
        name: &str,
        content_type: &str,
    ) -> ItemResult<ImageLocator>;

    /// Retrieve the payload behind a locator.
    async fn get_image(&self, locator: &ImageLocator) -> ItemResult<Bytes>;

    /// Remove the object behind a locator. An already-deleted object is
    /// treated as success.
    async fn delete_image(&self, locator: &ImageLocator) -> ItemResult<()>;

    /// Startup-only probe that the configured bucket is reachable; not part
    /// of the request hot path.
    async fn check_bucket(&self) -> ItemResult<()>;
}
