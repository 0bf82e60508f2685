//! Object store adapters for image payloads.

pub mod object_store_image_store;

pub use object_store_image_store::ObjectStoreImageStore;

use anyhow::{Context, Result};
use object_store::aws::AmazonS3Builder;
use std::sync::Arc;

/// Configuration for the S3 image store backend.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
}

/// Create an S3-backed image store from configuration.
///
/// The public base URL of the returned locators is the bucket's virtual-host
/// endpoint, or the custom endpoint when one is configured.
pub fn create_s3_image_store(config: S3Config) -> Result<ObjectStoreImageStore> {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    let store = builder.build().context("Failed to build S3 store")?;

    let public_base_url = match &config.endpoint {
        Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            config.bucket, config.region
        ),
    };

    Ok(ObjectStoreImageStore::new(Arc::new(store), public_base_url))
}
