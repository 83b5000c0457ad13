//! `Tripcast` - Short-range travel weather, air quality and packing advice
//!
//! This library provides geocoding, three-day weather and air-quality
//! summaries, packing advice and an HTTP API serving them.

pub mod advisor;
pub mod air_quality;
pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod location_resolver;
pub mod models;
pub mod packing;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use advisor::{CompletionParser, LanguageModel, OpenAiClient, PackingSuggestions};
pub use api::{AppState, router};
pub use config::{ApiKey, TripcastConfig};
pub use error::TripcastError;
pub use location_resolver::LocationResolver;
pub use models::{AirReport, CitySuggestion, DailyAirSummary, DailyWeather, Place, WeatherReport};
pub use weather::{OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripcastError>;

/// Round half away from zero to one decimal place
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
