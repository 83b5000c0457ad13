//! Data models for the Tripcast service
//!
//! This module contains the request-scoped value objects organized by concern:
//! - Location: resolved places and autocomplete suggestions
//! - Weather: normalized daily summaries and packing advice
//! - Air: hourly pollution readings and their daily summaries
//! - Report: the per-city payloads served by the API

pub mod air;
pub mod location;
pub mod report;
pub mod weather;

// Re-export all public types for convenient access
pub use air::{DailyAirSummary, PollutantAlert, PollutantReading};
pub use location::{CitySuggestion, GeocodingResult, Place};
pub use report::{AirReport, WeatherReport};
pub use weather::{DailyWeather, PackingAdvice, PackingCategory};
