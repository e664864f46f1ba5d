use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the weather sources.
///
/// Only `CityNotFound` and `NoDataAvailable` are expected to reach a caller of
/// the aggregator; the rest are absorbed and turned into fallback attempts.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No OpenWeatherMap credential was supplied.
    #[error("OpenWeatherMap API key is not configured")]
    NotConfigured,

    /// Network failure, timeout, non-success status or malformed payload.
    #[error("Upstream weather request failed: {detail}")]
    Upstream { detail: String },

    #[error("City {0} not found")]
    CityNotFound(String),

    /// The snapshot file is absent or cannot be parsed.
    #[error("Weather snapshot unavailable at {}: {detail}", path.display())]
    SnapshotMissing { path: PathBuf, detail: String },

    /// Every data source was tried and none produced data.
    #[error("No weather data available: {0}")]
    NoDataAvailable(String),

    #[error("Air quality feed request failed: {0}")]
    AirQuality(String),
}

impl WeatherError {
    pub(crate) fn upstream(detail: impl Into<String>) -> Self {
        Self::Upstream { detail: detail.into() }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
