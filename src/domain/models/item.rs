use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{FieldViolation, ValidationError};
use crate::domain::value_objects::{ImageLocator, ItemId};

/// Maximum title length in characters, after trimming.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length in characters, after trimming.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Fields supplied when creating an item.
#[derive(Debug, Clone)]
pub struct NewItemFields {
    pub title: String,
    pub description: String,
}

/// Partial field overwrite applied to an existing item. Absent fields are
/// left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_locator: Option<ImageLocator>,
}

/// The item record: a title/description pair with an optional associated
/// image.
///
/// An item that fails validation is never persisted; `id` and `created_at`
/// are set once at creation and never change, while `updated_at` is reset on
/// every successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub image_locator: Option<ImageLocator>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Construct a new item with a fresh id and both timestamps set to now.
    ///
    /// No validation happens at construction; callers run `normalize` then
    /// `validate` before persisting.
    pub fn create(fields: NewItemFields) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::generate(),
            title: fields.title,
            description: fields.description,
            image_locator: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Trim leading and trailing whitespace from title and description.
    /// Idempotent.
    pub fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
    }

    /// Check every field rule, collecting all violations rather than
    /// stopping at the first. Call after `normalize`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.title.trim().is_empty() {
            violations.push(FieldViolation::TitleRequired);
        }

        if self.description.trim().is_empty() {
            violations.push(FieldViolation::DescriptionRequired);
        }

        let title_len = self.title.chars().count();
        if title_len > TITLE_MAX_CHARS {
            violations.push(FieldViolation::TitleTooLong {
                actual: title_len,
                max: TITLE_MAX_CHARS,
            });
        }

        let description_len = self.description.chars().count();
        if description_len > DESCRIPTION_MAX_CHARS {
            violations.push(FieldViolation::DescriptionTooLong {
                actual: description_len,
                max: DESCRIPTION_MAX_CHARS,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Overwrite the supplied fields and refresh `updated_at`. `id` and
    /// `created_at` are never touched.
    pub fn apply_update(&mut self, changes: ItemChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(locator) = changes.image_locator {
            self.image_locator = Some(locator);
        }
        self.updated_at = Utc::now();
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_item() -> Item {
        Item::create(NewItemFields {
            title: "A title".to_string(),
            description: "A description".to_string(),
        })
    }

    #[test]
    fn test_create_sets_equal_timestamps_and_no_image() {
        let item = valid_item();
        assert_eq!(item.created_at, item.updated_at);
        assert!(item.image_locator.is_none());
    }

    #[test]
    fn test_valid_item_passes_validation() {
        assert!(valid_item().validate().is_ok());
    }

    #[test]
    fn test_boundary_lengths_pass() {
        let mut item = valid_item();
        item.title = "t".repeat(TITLE_MAX_CHARS);
        item.description = "d".repeat(DESCRIPTION_MAX_CHARS);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_empty_fields_collect_one_violation_each() {
        let mut item = valid_item();
        item.title = "   ".to_string();
        item.description = String::new();
        item.normalize();

        let err = item.validate().unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.violations.contains(&FieldViolation::TitleRequired));
        assert!(err.violations.contains(&FieldViolation::DescriptionRequired));
    }

    #[test]
    fn test_over_length_fields_are_rejected() {
        let mut item = valid_item();
        item.title = "t".repeat(TITLE_MAX_CHARS + 1);
        item.description = "d".repeat(DESCRIPTION_MAX_CHARS + 1);

        let err = item.validate().unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.joined().contains("Title must be at most"));
        assert!(err.joined().contains("Description must be at most"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut item = valid_item();
        item.title = "  padded title  ".to_string();
        item.description = "\tpadded description\n".to_string();

        item.normalize();
        let once = item.clone();
        item.normalize();

        assert_eq!(item, once);
        assert_eq!(item.title, "padded title");
        assert_eq!(item.description, "padded description");
    }

    #[test]
    fn test_apply_update_overwrites_only_supplied_fields() {
        let mut item = valid_item();
        let id = item.id.clone();
        let created_at = item.created_at;

        item.apply_update(ItemChanges {
            title: Some("New title".to_string()),
            ..Default::default()
        });

        assert_eq!(item.title, "New title");
        assert_eq!(item.description, "A description");
        assert_eq!(item.id, id);
        assert_eq!(item.created_at, created_at);
        assert!(item.updated_at >= created_at);
    }

    #[test]
    fn test_apply_update_can_swap_image_locator() {
        let mut item = valid_item();
        item.image_locator = Some(ImageLocator::new("memory://b/images/old.png".to_string()));

        item.apply_update(ItemChanges {
            image_locator: Some(ImageLocator::new("memory://b/images/new.png".to_string())),
            ..Default::default()
        });

        assert_eq!(
            item.image_locator.as_ref().map(|l| l.as_str()),
            Some("memory://b/images/new.png")
        );
    }
}
