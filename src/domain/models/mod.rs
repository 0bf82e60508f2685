mod item;
mod upload;

pub use item::{DESCRIPTION_MAX_CHARS, Item, ItemChanges, NewItemFields, TITLE_MAX_CHARS};
pub use upload::{ALLOWED_EXTENSIONS, ImageUpload, MAX_IMAGE_BYTES};
