//! Bundled weather snapshot used when the live provider is unavailable.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    model::{AggregateResponse, DataSource, WeatherRecord},
};

/// On-disk shape of the snapshot. Extra top-level keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument {
    cities: Vec<WeatherRecord>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

/// Reads the fallback snapshot from a path fixed at startup.
///
/// The file is re-read on every call so a redeployed snapshot is picked up
/// without a restart.
#[derive(Debug, Clone)]
pub struct FallbackStore {
    path: PathBuf,
}

impl FallbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole snapshot, tagged as fallback data.
    pub async fn load_snapshot(&self) -> Result<AggregateResponse> {
        let doc = self.read().await?;

        Ok(AggregateResponse {
            cities: doc.cities,
            last_updated: doc.last_updated.unwrap_or_else(Utc::now),
            data_source: DataSource::Fallback,
        })
    }

    /// Find one city in the snapshot, ignoring case.
    pub async fn lookup_city(&self, name: &str) -> Result<WeatherRecord> {
        let doc = self.read().await?;
        let wanted = name.to_lowercase();

        doc.cities
            .into_iter()
            .find(|record| record.city.to_lowercase() == wanted)
            .ok_or_else(|| WeatherError::CityNotFound(name.to_string()))
    }

    async fn read(&self) -> Result<SnapshotDocument> {
        debug!(path = %self.path.display(), "Reading weather snapshot");

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            WeatherError::SnapshotMissing {
                path: self.path.clone(),
                detail: format!("read failed: {e}"),
            }
        })?;

        serde_json::from_str(&contents).map_err(|e| WeatherError::SnapshotMissing {
            path: self.path.clone(),
            detail: format!("parse failed: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_snapshot(dir: &TempDir, value: &serde_json::Value) -> PathBuf {
        let path = dir.path().join("weather-data.json");
        fs::write(&path, serde_json::to_string_pretty(value).expect("json")).expect("write");
        path
    }

    fn sample() -> serde_json::Value {
        json!({
            "cities": [
                { "city": "Toronto", "temperature": 15, "condition": "Partly Cloudy",
                  "humidity": 65, "windSpeed": 12, "icon": "02d",
                  "latitude": 43.6532, "longitude": -79.3832, "province": "Ontario" },
                { "city": "Quebec City", "temperature": 11, "condition": "Clear",
                  "humidity": 58, "windSpeed": 9, "icon": "01d" }
            ],
            "lastUpdated": "2025-01-15T10:00:00Z",
            "dataSource": "Static JSON",
            "version": "1.0"
        })
    }

    #[tokio::test]
    async fn load_snapshot_tags_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FallbackStore::new(write_snapshot(&dir, &sample()));

        let snapshot = store.load_snapshot().await.expect("snapshot");
        assert_eq!(snapshot.data_source, DataSource::Fallback);
        assert_eq!(snapshot.cities.len(), 2);
        assert_eq!(snapshot.last_updated.to_rfc3339(), "2025-01-15T10:00:00+00:00");
        assert_eq!(snapshot.cities[1].province, None);
    }

    #[tokio::test]
    async fn lookup_city_ignores_case() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FallbackStore::new(write_snapshot(&dir, &sample()));

        let a = store.lookup_city("toronto").await.expect("found");
        let b = store.lookup_city("TORONTO").await.expect("found");
        assert_eq!(a, b);
        assert_eq!(a.wind_speed, 12);

        let qc = store.lookup_city("quebec city").await.expect("found");
        assert_eq!(qc.city, "Quebec City");
    }

    #[tokio::test]
    async fn lookup_unknown_city_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FallbackStore::new(write_snapshot(&dir, &sample()));

        let err = store.lookup_city("Winnipeg").await.unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound(ref c) if c == "Winnipeg"));
    }

    #[tokio::test]
    async fn missing_file_is_snapshot_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FallbackStore::new(dir.path().join("nope.json"));

        let err = store.load_snapshot().await.unwrap_err();
        match err {
            WeatherError::SnapshotMissing { detail, .. } => assert!(detail.starts_with("read")),
            other => panic!("expected SnapshotMissing, got {other:?}"),
        }

        let err = store.lookup_city("Toronto").await.unwrap_err();
        assert!(matches!(err, WeatherError::SnapshotMissing { .. }));
    }

    #[tokio::test]
    async fn corrupt_file_is_snapshot_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("weather-data.json");
        fs::write(&path, "{ not json").expect("write");

        let err = FallbackStore::new(path).load_snapshot().await.unwrap_err();
        match err {
            WeatherError::SnapshotMissing { detail, .. } => assert!(detail.starts_with("parse")),
            other => panic!("expected SnapshotMissing, got {other:?}"),
        }
    }
}
