use axum::Json;
use chrono::Utc;

use crate::adapters::inbound::http::dto::HealthDto;

/// `GET /api/health` liveness probe.
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}
