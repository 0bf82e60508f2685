use anyhow::{Context, Result};
use clap::Parser;
use item_catalog_server::{
    adapters::inbound::http::router::{AppState, create_router},
    app::{AppBuilder, AppConfig, AppServices, RepositoryBackend, StorageBackend},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "item-catalog-server")]
#[command(about = "A CRUD item catalog server backed by a record store and an object store", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "PORT", default_value = "3001")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Object store backend for images (memory | s3)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// Record store backend for item records (memory | database)
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// S3 bucket holding image objects
    #[arg(long, env = "S3_BUCKET_NAME")]
    s3_bucket: Option<String>,

    /// AWS region for the S3 bucket
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    s3_region: String,

    /// AWS access key id
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    s3_access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
    s3_secret_key: Option<String>,

    /// Custom S3 endpoint (MinIO and friends)
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// Database URL for the record store (SQLite)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => {
                let bucket = self
                    .s3_bucket
                    .clone()
                    .context("S3_BUCKET_NAME is required for the s3 backend")?;

                StorageBackend::S3 {
                    bucket,
                    region: self.s3_region.clone(),
                    access_key: self.s3_access_key.clone(),
                    secret_key: self.s3_secret_key.clone(),
                    endpoint: self.s3_endpoint.clone(),
                }
            }
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for the database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
        })
    }

    fn init_logging(&self) {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&self.log_level))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    info!("Starting item catalog server");
    info!("Record store backend: {}", cli.repository_backend);
    info!("Object store backend: {}", cli.storage_backend);

    let config = cli.to_app_config()?;

    let deps = AppBuilder::new()
        .with_config(config)
        .build_dependencies()
        .await
        .context("Failed to build application")?;

    // Fail fast on misconfigured stores rather than at first request.
    deps.verify_connectivity()
        .await
        .context("Backing store connectivity check failed")?;
    info!("Record store and object store reachable");

    let services = AppServices::from_dependencies(&deps);
    let state = AppState {
        item_service: Arc::new(services.item_service),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
