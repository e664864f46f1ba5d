use crate::{
    Config,
    error::Result,
    model::{CityDescriptor, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// A live source of current weather for a single city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Whether the provider has the credentials it needs to go to the network.
    fn is_configured(&self) -> bool;

    /// Fetch and normalize the current weather for `city`.
    ///
    /// Issues at most one outbound request and never retries.
    async fn fetch(&self, city: &CityDescriptor) -> Result<WeatherRecord>;
}

/// Construct the OpenWeatherMap provider from config.
///
/// A missing API key is not an error here: the provider is built unconfigured
/// and reports `NotConfigured` on every fetch.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::new(
        config.api_key().map(str::to_owned),
        config.openweather.base_url.clone(),
        config.openweather.timeout_secs,
    )?;

    Ok(Arc::new(provider))
}
