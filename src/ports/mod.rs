pub mod repositories;
pub mod services;
pub mod storage;

pub use repositories::ItemRepository;
pub use services::ItemService;
pub use storage::ImageStore;
