use serde::{Deserialize, Serialize};

use crate::domain::errors::ItemError;

/// An opaque, stable reference to a stored image.
///
/// Locators are publicly dereferenceable URLs, e.g.
/// `https://my-bucket.s3.us-east-1.amazonaws.com/images/abc-cat.png` for the
/// S3 backend or `memory://my-bucket/images/abc-cat.png` for the in-memory
/// backend. The storage key can be recovered by parsing the URL path, which
/// is how deletion resolves a locator back into the object store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageLocator(String);

impl ImageLocator {
    pub fn new(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the object storage key from the locator.
    ///
    /// The key is the URL path with the leading slash stripped, matching how
    /// the locator was derived at upload time.
    pub fn storage_key(&self) -> Result<String, ItemError> {
        let rest = self
            .0
            .split_once("://")
            .map(|(_, rest)| rest)
            .ok_or_else(|| ItemError::StoreUnavailable {
                message: format!("image locator is not a URL: {}", self.0),
                source: None,
            })?;

        match rest.split_once('/') {
            Some((_host, path)) if !path.is_empty() => Ok(path.to_string()),
            _ => Err(ItemError::StoreUnavailable {
                message: format!("image locator has no object path: {}", self.0),
                source: None,
            }),
        }
    }
}

impl std::fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
