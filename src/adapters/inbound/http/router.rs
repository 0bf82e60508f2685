use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{create_item, delete_item, get_item, health, list_items, update_item};
use crate::{domain::models::MAX_IMAGE_BYTES, ports::services::ItemService};

/// Application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub item_service: Arc<dyn ItemService>,
}

/// Create the application router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        // Sized above the image cap plus form overhead so the domain rule,
        // not the framework default, rejects oversized uploads.
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
