use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    adapters::outbound::{
        persistence::{InMemoryItemRepository, SqlItemRepository},
        storage::{ObjectStoreImageStore, S3Config, create_s3_image_store},
    },
    domain::errors::ItemError,
    ports::{repositories::ItemRepository, storage::ImageStore},
    services::ItemServiceImpl,
};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
        }
    }
}

/// Object store backend for image payloads.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3 {
        bucket: String,
        region: String,
        access_key: Option<String>,
        secret_key: Option<String>,
        endpoint: Option<String>,
    },
}

/// Record store backend for item records.
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    Database { connection_string: String },
}

/// Application dependencies, constructed once at startup and passed
/// explicitly into the service. No lazy-initialized client state exists
/// anywhere.
pub struct AppDependencies {
    pub item_repository: Arc<dyn ItemRepository>,
    pub image_store: Arc<dyn ImageStore>,
}

impl AppDependencies {
    /// Probe both backing stores, failing fast on misconfiguration. Run at
    /// startup only; never on the request path.
    pub async fn verify_connectivity(&self) -> Result<(), ItemError> {
        self.item_repository.check_connectivity().await?;
        self.image_store.check_bucket().await?;
        Ok(())
    }
}

/// Application services container.
pub struct AppServices {
    pub item_service: ItemServiceImpl,
}

/// Application builder for dependency injection.
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Build the adapters behind their ports.
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        let image_store: Arc<dyn ImageStore> = match &self.config.storage_backend {
            StorageBackend::InMemory => Arc::new(ObjectStoreImageStore::in_memory("items")),
            StorageBackend::S3 {
                bucket,
                region,
                access_key,
                secret_key,
                endpoint,
            } => {
                let store = create_s3_image_store(S3Config {
                    bucket: bucket.clone(),
                    region: region.clone(),
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                    endpoint: endpoint.clone(),
                })
                .map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?;
                Arc::new(store)
            }
        };

        let item_repository: Arc<dyn ItemRepository> = match &self.config.repository_backend {
            RepositoryBackend::InMemory => Arc::new(InMemoryItemRepository::new()),
            RepositoryBackend::Database { connection_string } => {
                let options = SqliteConnectOptions::from_str(connection_string)
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("invalid DATABASE_URL: {e}"),
                    })?
                    .create_if_missing(true);

                let pool = SqlitePool::connect_with(options).await.map_err(|e| {
                    AppError::RepositoryInit {
                        message: format!("failed to open record store: {e}"),
                    }
                })?;

                let repository = SqlItemRepository::new(pool);
                repository
                    .migrate()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("failed to migrate record store: {e}"),
                    })?;
                Arc::new(repository)
            }
        };

        Ok(AppDependencies {
            item_repository,
            image_store,
        })
    }

    /// Build the complete application with services.
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;
        Ok(AppServices::from_dependencies(&deps))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppServices {
    pub fn from_dependencies(deps: &AppDependencies) -> Self {
        Self {
            item_service: ItemServiceImpl::new(
                deps.item_repository.clone(),
                deps.image_store.clone(),
            ),
        }
    }
}

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Create an in-memory application for testing and development.
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::services::ItemService;

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app().await.unwrap();
        assert!(app.item_service.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_connectivity_check_passes() {
        let deps = AppBuilder::new().build_dependencies().await.unwrap();
        deps.verify_connectivity().await.unwrap();
    }

    #[tokio::test]
    async fn test_database_backend_builds_and_migrates() {
        let deps = AppBuilder::new()
            .with_repository_backend(RepositoryBackend::Database {
                connection_string: "sqlite::memory:".to_string(),
            })
            .build_dependencies()
            .await
            .unwrap();
        deps.verify_connectivity().await.unwrap();
    }
}
