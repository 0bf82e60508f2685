use axum::{Json, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{errors::ItemError, models::Item};

/// Wire representation of an item, matching the JSON shape the browser
/// client consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        ItemDto {
            id: item.id.to_string(),
            title: item.title,
            description: item.description,
            image_url: item.image_locator.map(|l| l.as_str().to_string()),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// DTO for error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponseDto {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponseDto {
            error: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// DTO for the liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Map a domain error onto an HTTP response.
///
/// Store failures are logged with full detail server-side and surfaced to
/// the caller with a generic message only.
pub fn error_response(err: ItemError) -> (StatusCode, Json<ErrorResponseDto>) {
    match &err {
        ItemError::Validation(_) | ItemError::InvalidId { .. } | ItemError::UploadRejected { .. } => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponseDto::new(err.to_string())))
        }
        ItemError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponseDto::new(err.to_string())),
        ),
        ItemError::PermissionDenied { .. } => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponseDto::new("Access denied")),
        ),
        ItemError::StoreUnavailable { message, source } => {
            error!(detail = %message, source = ?source, "backing store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponseDto::new("Internal server error")),
            )
        }
    }
}
