// Health check endpoint handler implementation

use axum::Json;
use serde::Serialize;

// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    status: String,
}

/// Handler for GET /health - Returns a simple health check response to verify the API is running
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}
