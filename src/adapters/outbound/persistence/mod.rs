//! Record store adapters for item records.

pub mod in_memory_item_repository;
pub mod sql_item_repository;

pub use in_memory_item_repository::InMemoryItemRepository;
pub use sql_item_repository::SqlItemRepository;
