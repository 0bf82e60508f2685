pub mod health_handlers;
pub mod item_handlers;

pub use health_handlers::*;
pub use item_handlers::*;
