use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{
    Attribute, Attributes, ObjectStore as BackendObjectStore, PutOptions, PutPayload,
    path::Path as ObjectPath,
};
use std::sync::Arc;

use crate::{
    domain::{
        errors::{ItemError, ItemResult},
        value_objects::ImageLocator,
    },
    ports::storage::ImageStore,
};

/// Prefix under which all image objects are keyed.
const IMAGE_KEY_PREFIX: &str = "images";

/// ImageStore adapter over the Apache object_store crate.
///
/// Works against any backend the crate supports; the public base URL decides
/// what the returned locators look like (an S3 website URL in production, a
/// `memory://` URL for the in-memory backend).
pub struct ObjectStoreImageStore {
    inner: Arc<dyn BackendObjectStore>,
    public_base_url: String,
}

impl ObjectStoreImageStore {
    pub fn new(inner: Arc<dyn BackendObjectStore>, public_base_url: String) -> Self {
        Self {
            inner,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// An in-memory store for testing and development.
    pub fn in_memory(bucket: &str) -> Self {
        Self::new(
            Arc::new(object_store::memory::InMemory::new()),
            format!("memory://{bucket}"),
        )
    }

    fn object_key(name: &str) -> String {
        format!("{IMAGE_KEY_PREFIX}/{name}")
    }

    fn locator_for(&self, key: &str) -> ImageLocator {
        ImageLocator::new(format!("{}/{}", self.public_base_url, key))
    }

    fn convert_error(error: object_store::Error, context: &str) -> ItemError {
        match error {
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => ItemError::PermissionDenied {
                message: format!("{context}: access denied by object store"),
            },
            other => ItemError::StoreUnavailable {
                message: format!("{context}: object store request failed"),
                source: Some(other.to_string()),
            },
        }
    }
}

#[async_trait]
impl ImageStore for ObjectStoreImageStore {
    async fn put_image(
        &self,
        data: Bytes,
        name: &str,
        content_type: &str,
    ) -> ItemResult<ImageLocator> {
        let key = Self::object_key(name);
        let path = ObjectPath::from(key.as_str());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&path, PutPayload::from(data), options)
            .await
            .map_err(|e| Self::convert_error(e, "upload image"))?;

        Ok(self.locator_for(&key))
    }

    async fn get_image(&self, locator: &ImageLocator) -> ItemResult<Bytes> {
        let key = locator.storage_key()?;
        let path = ObjectPath::from(key.as_str());

        let result = self
            .inner
            .get(&path)
            .await
            .map_err(|e| Self::convert_error(e, "fetch image"))?;

        result
            .bytes()
            .await
            .map_err(|e| Self::convert_error(e, "fetch image body"))
    }

    async fn delete_image(&self, locator: &ImageLocator) -> ItemResult<()> {
        let key = locator.storage_key()?;
        let path = ObjectPath::from(key.as_str());

        match self.inner.delete(&path).await {
            Ok(()) => Ok(()),
            // Already deleted counts as success.
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(Self::convert_error(e, "delete image")),
        }
    }

    async fn check_bucket(&self) -> ItemResult<()> {
        let mut listing = self.inner.list(None);
        listing
            .try_next()
            .await
            .map_err(|e| Self::convert_error(e, "bucket connectivity check"))?;

        Ok(())
    }
}
