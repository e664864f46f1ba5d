//! Health, endpoint index and the catch-all 404.

use axum::{
    Json,
    http::{HeaderMap, Method, StatusCode, Uri, header::HOST},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

fn endpoints() -> Value {
    json!({
        "health": "/api/health",
        "canadaSummary": "/api/canada-summary",
        "ontarioAQHI": "/api/ontario-aqhi",
        "ontarioRecords": "/api/ontario-records",
        "detailsData": "/api/details-data/:city",
        "messages": "/api/messages (GET, POST, DELETE /api/messages/:id)"
    })
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string(), timestamp: Utc::now() })
}

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Weather AQHI Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "documentation": "Visit /api to see all available endpoints",
        "endpoints": endpoints(),
    }))
}

/// `GET /api`
pub async fn api_index(headers: HeaderMap) -> Json<Value> {
    Json(json!({
        "message": "Weather AQHI Backend API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints(),
        "baseUrl": base_url(&headers),
    }))
}

/// `http://<Host>` as seen by the client; TLS is terminated in front of us.
fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}

/// Anything not routed.
pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    let target = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": format!("Cannot {method} {target}"),
            "availableEndpoints": endpoints(),
            "tip": "Visit /api to see all available endpoints",
        })),
    )
}
