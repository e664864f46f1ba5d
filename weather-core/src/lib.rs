//! Core library for the Weather Trek backend.
//!
//! This crate defines:
//! - The catalog of Canadian cities and the condition vocabulary
//! - Live weather from OpenWeatherMap behind the `WeatherProvider` trait
//! - The bundled snapshot used as fallback, and the aggregator choosing between them
//! - The in-memory message board and the Ontario AQHI pass-through
//! - Configuration & credentials handling
//!
//! It is used by `trek-server`, but carries no HTTP server code of its own.

pub mod air_quality;
pub mod aggregator;
pub mod board;
pub mod catalog;
pub mod condition;
pub mod config;
pub mod error;
pub mod fallback;
pub mod model;
pub mod provider;

pub use air_quality::AqhiClient;
pub use aggregator::WeatherAggregator;
pub use board::MessageBoard;
pub use catalog::CityCatalog;
pub use condition::map_condition;
pub use config::Config;
pub use error::WeatherError;
pub use fallback::FallbackStore;
pub use model::{AggregateResponse, CityDescriptor, DataSource, Message, WeatherRecord};
pub use provider::{WeatherProvider, provider_from_config};
