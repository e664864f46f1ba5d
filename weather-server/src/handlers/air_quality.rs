//! Ontario air quality feed and bundled records.

use axum::{Json, extract::State};
use tracing::error;

use crate::{error::ApiError, state::AppState};

const RECORDS_FILE: &str = "ontario-records.json";

/// `GET /api/ontario-aqhi`
pub async fn ontario_aqhi(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.aqhi.fetch().await.map(Json).map_err(|e| {
        error!(error = %e, "Error fetching Ontario AQHI");
        ApiError::internal("Failed to fetch Ontario AQHI data", e.to_string())
    })
}

/// `GET /api/ontario-records`
pub async fn ontario_records(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let path = state.records_path.as_path();

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "Error reading {RECORDS_FILE}");
        ApiError::Internal {
            error: format!(
                "Failed to read {RECORDS_FILE}. Check if file exists at {}",
                path.display()
            ),
            message: None,
        }
    })?;

    let value = serde_json::from_str(&contents).map_err(|e| {
        error!(path = %path.display(), error = %e, "Error parsing {RECORDS_FILE}");
        ApiError::Internal { error: format!("Failed to parse {RECORDS_FILE}"), message: None }
    })?;

    Ok(Json(value))
}
