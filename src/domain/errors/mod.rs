mod item_errors;
mod validation_errors;

pub use item_errors::{ItemError, ItemResult};
pub use validation_errors::{FieldViolation, ValidationError};
