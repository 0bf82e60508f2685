pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    FieldViolation,
    ImageLocator,
    ImageUpload,
    // Models
    Item,
    ItemChanges,
    // Errors
    ItemError,
    // Value objects
    ItemId,
    ItemResult,
    NewItemFields,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{ImageStore, ItemRepository, ItemService};

// Service implementations - business logic
pub use services::ItemServiceImpl;

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppDependencies, AppError, AppServices, RepositoryBackend,
    StorageBackend, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    persistence::{InMemoryItemRepository, SqlItemRepository},
    storage::ObjectStoreImageStore,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AppBuilder, AppServices, ImageStore, ImageUpload, InMemoryItemRepository, Item,
        ItemChanges, ItemId, ItemRepository, ItemService, ItemServiceImpl, NewItemFields,
        ObjectStoreImageStore, create_in_memory_app,
    };
}
