use bytes::Bytes;

use crate::domain::errors::ItemError;

/// Maximum accepted image payload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// File extensions accepted for image uploads.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// An accepted image payload, validated at construction.
///
/// The acceptance rules (size cap, `image/*` content type, extension
/// allowlist) run before the object store is ever touched, so a rejected
/// upload never creates an object.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: String, content_type: String, data: Bytes) -> Result<Self, ItemError> {
        if data.len() > MAX_IMAGE_BYTES {
            return Err(ItemError::UploadRejected {
                reason: "File size too large. Maximum size is 5MB.".to_string(),
            });
        }

        if !content_type.starts_with("image/") {
            return Err(ItemError::UploadRejected {
                reason: "Only image files are allowed".to_string(),
            });
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(ItemError::UploadRejected {
                    reason: "Invalid file extension. Allowed: jpg, jpeg, png, gif, webp"
                        .to_string(),
                });
            }
        }

        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: &str, len: usize) -> Result<ImageUpload, ItemError> {
        ImageUpload::new(
            name.to_string(),
            content_type.to_string(),
            Bytes::from(vec![0u8; len]),
        )
    }

    #[test]
    fn test_accepts_allowed_image_files() {
        for name in ["cat.png", "cat.jpg", "cat.JPEG", "cat.gif", "cat.webp"] {
            assert!(upload(name, "image/png", 16).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_non_image_content_type() {
        let err = upload("cat.png", "text/plain", 16).unwrap_err();
        assert!(matches!(err, ItemError::UploadRejected { .. }));
    }

    #[test]
    fn test_rejects_disallowed_extension() {
        assert!(upload("cat.bmp", "image/bmp", 16).is_err());
        assert!(upload("no-extension", "image/png", 16).is_err());
    }

    #[test]
    fn test_rejects_oversized_payload() {
        assert!(upload("cat.png", "image/png", MAX_IMAGE_BYTES).is_ok());
        let err = upload("cat.png", "image/png", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(err.to_string().contains("5MB"));
    }
}
