//! Live-or-fallback orchestration across the city catalog.

use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    catalog::CityCatalog,
    error::{Result, WeatherError},
    fallback::FallbackStore,
    model::{AggregateResponse, DataSource, WeatherRecord},
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    catalog: CityCatalog,
    provider: Arc<dyn WeatherProvider>,
    fallback: FallbackStore,
}

impl WeatherAggregator {
    pub fn new(
        catalog: CityCatalog,
        provider: Arc<dyn WeatherProvider>,
        fallback: FallbackStore,
    ) -> Self {
        Self { catalog, provider, fallback }
    }

    /// Whether live fetches will be attempted at all.
    pub fn is_live_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Weather for every catalog city.
    ///
    /// All cities are fetched concurrently and every fetch is awaited. If any
    /// succeeds the live set wins wholesale; otherwise the snapshot is served.
    #[instrument(skip(self))]
    pub async fn get_all_cities(&self) -> Result<AggregateResponse> {
        if self.provider.is_configured() {
            info!(cities = self.catalog.len(), "Fetching weather from OpenWeatherMap");

            let cities = self.catalog.cities();
            let results = join_all(cities.iter().map(|city| self.provider.fetch(city))).await;

            // join_all yields in input order, so live records follow catalog order.
            let live: Vec<WeatherRecord> = cities
                .iter()
                .zip(results)
                .filter_map(|(city, result)| match result {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(city = city.name, error = %e, "Upstream fetch failed");
                        None
                    }
                })
                .collect();

            if !live.is_empty() {
                debug!(live = live.len(), "Serving live weather");
                return Ok(AggregateResponse {
                    cities: live,
                    last_updated: Utc::now(),
                    data_source: DataSource::Live,
                });
            }

            warn!("Every upstream fetch failed");
        } else {
            debug!("OpenWeatherMap API key not set");
        }

        info!(path = %self.fallback.path().display(), "Using JSON fallback for weather data");

        self.fallback.load_snapshot().await.map_err(|e| {
            error!(error = %e, "Fallback snapshot unavailable");
            let reason = if self.provider.is_configured() {
                "Weather API unavailable and JSON fallback unavailable"
            } else {
                "Weather API key not set and JSON fallback unavailable"
            };
            WeatherError::NoDataAvailable(reason.to_string())
        })
    }

    /// Weather for one catalog city, live first, then from the snapshot.
    #[instrument(skip(self))]
    pub async fn get_city_details(&self, city_name: &str) -> Result<WeatherRecord> {
        let city = self
            .catalog
            .find(city_name)
            .ok_or_else(|| WeatherError::CityNotFound(city_name.to_string()))?;

        match self.provider.fetch(city).await {
            Ok(record) => return Ok(record),
            Err(WeatherError::NotConfigured) => debug!("OpenWeatherMap API key not set"),
            Err(e) => warn!(city = city.name, error = %e, "Upstream fetch failed"),
        }

        info!(city = city.name, "Using JSON fallback");

        self.fallback.lookup_city(city_name).await.map_err(|e| {
            warn!(city = city.name, error = %e, "City unavailable in fallback snapshot");
            WeatherError::NoDataAvailable(format!("City {city_name} not found in data"))
        })
    }
}
