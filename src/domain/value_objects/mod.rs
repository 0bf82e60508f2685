mod image_locator;
mod item_id;

pub use image_locator::ImageLocator;
pub use item_id::ItemId;
