mod item_service_impl;

pub use item_service_impl::ItemServiceImpl;
