use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A city the backend knows how to report on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityDescriptor {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub province: &'static str,
}

/// Normalized weather for one city, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: i64,
    pub condition: String,
    pub humidity: i64,
    pub wind_speed: i64,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Live,
    Fallback,
}

/// Payload of the national summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub cities: Vec<WeatherRecord>,
    pub last_updated: DateTime<Utc>,
    pub data_source: DataSource,
}

/// A message board entry. The text travels as `message` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "message")]
    pub text: String,
    pub timestamp: DateTime<Utc>,
}
