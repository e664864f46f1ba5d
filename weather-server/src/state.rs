//! Shared application state

use std::{path::PathBuf, sync::Arc};

use trek_core::{AqhiClient, CityCatalog, Config, FallbackStore, MessageBoard, WeatherAggregator};

/// Everything a handler needs. Built once at startup and dropped on shutdown.
#[derive(Debug, Clone)]
pub struct AppState {
    pub aggregator: Arc<WeatherAggregator>,
    pub board: Arc<MessageBoard>,
    pub aqhi: Arc<AqhiClient>,
    /// Location of the bundled Ontario records document.
    pub records_path: Arc<PathBuf>,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = trek_core::provider_from_config(config)?;
        let aggregator = WeatherAggregator::new(
            CityCatalog::default(),
            provider,
            FallbackStore::new(config.snapshot_path()),
        );

        Ok(Self {
            aggregator: Arc::new(aggregator),
            board: Arc::new(MessageBoard::new()),
            aqhi: Arc::new(AqhiClient::new(&config.aqhi)?),
            records_path: Arc::new(config.records_path()),
        })
    }
}
