use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    condition::map_condition,
    error::{Result, WeatherError},
    model::{CityDescriptor, WeatherRecord},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: Option<String>, base_url: String, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .context("Failed to build OpenWeather HTTP client")?;

        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch_current(&self, api_key: &str, city: &CityDescriptor) -> Result<WeatherRecord> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", city.latitude.to_string()),
                ("lon", city.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                WeatherError::upstream(format!("request for {} failed: {e}", city.name))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::upstream(format!("reading response for {} failed: {e}", city.name))
        })?;

        if !status.is_success() {
            return Err(WeatherError::upstream(format!(
                "request for {} failed with status {}: {}",
                city.name,
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::upstream(format!("malformed payload for {}: {e}", city.name))
        })?;

        to_record(city, parsed)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

fn to_record(city: &CityDescriptor, parsed: OwCurrentResponse) -> Result<WeatherRecord> {
    let weather = parsed.weather.first().ok_or_else(|| {
        WeatherError::upstream(format!("payload for {} has no weather entry", city.name))
    })?;

    Ok(WeatherRecord {
        city: city.name.to_string(),
        temperature: round_half_up(parsed.main.temp),
        condition: map_condition(&weather.main),
        humidity: round_half_up(parsed.main.humidity),
        wind_speed: mps_to_kmh(parsed.wind.speed),
        icon: weather.icon.clone(),
        latitude: Some(city.latitude),
        longitude: Some(city.longitude),
        province: Some(city.province.to_string()),
    })
}

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Convert a wind speed from m/s to whole km/h.
pub fn mps_to_kmh(speed_mps: f64) -> i64 {
    round_half_up(speed_mps * 3.6)
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self, city), fields(city = city.name))]
    async fn fetch(&self, city: &CityDescriptor) -> Result<WeatherRecord> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(WeatherError::NotConfigured);
        };

        debug!(lat = city.latitude, lon = city.longitude, "Fetching current weather");
        self.fetch_current(api_key, city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
