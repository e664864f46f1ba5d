//! National summary and per-city details.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::error;
use trek_core::{AggregateResponse, WeatherError, WeatherRecord};

use crate::{error::ApiError, state::AppState};

/// `GET /api/canada-summary`
pub async fn canada_summary(
    State(state): State<AppState>,
) -> Result<Json<AggregateResponse>, ApiError> {
    match state.aggregator.get_all_cities().await {
        Ok(summary) => Ok(Json(summary)),
        Err(WeatherError::NoDataAvailable(reason)) => {
            Err(ApiError::internal("Failed to fetch weather data", reason))
        }
        Err(e) => {
            error!(error = %e, "Canada summary failed");
            Err(ApiError::internal("Failed to fetch weather data", e.to_string()))
        }
    }
}

/// `GET /api/details-data/{city}`
pub async fn city_details(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherRecord>, ApiError> {
    match state.aggregator.get_city_details(&city).await {
        Ok(record) => Ok(Json(record)),
        Err(WeatherError::CityNotFound(name)) => {
            Err(ApiError::NotFound(format!("City {name} not found")))
        }
        Err(WeatherError::NoDataAvailable(reason)) => Err(ApiError::NotFound(reason)),
        Err(e) => {
            error!(city = %city, error = %e, "City details failed");
            Err(ApiError::internal("Failed to fetch city details", e.to_string()))
        }
    }
}
