use crate::domain::errors::ValidationError;
use crate::domain::value_objects::ItemId;

/// Errors surfaced by the item lifecycle and its backing stores.
///
/// Every store call either succeeds or fails the whole request-level
/// operation; no retries are performed anywhere.
#[derive(Debug, Clone)]
pub enum ItemError {
    /// User input violates the field rules; carries every violated rule.
    Validation(ValidationError),

    /// No record exists for the identifier.
    NotFound { id: ItemId },

    /// The identifier is not UUID-shaped; rejected before any store access.
    InvalidId { value: String },

    /// The uploaded file was rejected before touching the object store.
    UploadRejected { reason: String },

    /// A backing store is unreachable or misconfigured. Full detail is
    /// logged server-side; callers get a generic message.
    StoreUnavailable {
        message: String,
        // Underlying error kept as a string so the variant stays Clone.
        source: Option<String>,
    },

    /// The backing store denied access.
    PermissionDenied { message: String },
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemError::Validation(error) => write!(f, "{}", error),
            ItemError::NotFound { id } => write!(f, "Item not found: {}", id),
            ItemError::InvalidId { value } => {
                write!(f, "Invalid item ID format: {}", value)
            }
            ItemError::UploadRejected { reason } => write!(f, "{}", reason),
            ItemError::StoreUnavailable { message, .. } => {
                write!(f, "Store unavailable: {}", message)
            }
            ItemError::PermissionDenied { message } => {
                write!(f, "Permission denied: {}", message)
            }
        }
    }
}

impl std::error::Error for ItemError {}

impl From<ValidationError> for ItemError {
    fn from(error: ValidationError) -> Self {
        ItemError::Validation(error)
    }
}

/// Result type for item lifecycle and store operations.
pub type ItemResult<T> = Result<T, ItemError>;
