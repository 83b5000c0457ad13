//! Day-summary normalization
//!
//! The One Call day summary has changed shape across plan tiers and API
//! revisions, so every output field is read through an ordered chain of
//! extractors. The first extractor yielding a number wins; non-numeric
//! candidates fall through to the next one.

use serde_json::Value;

use crate::models::DailyWeather;
use crate::round_to_tenth;

/// A named way of reading one numeric field out of a day summary
#[derive(Debug, Clone, Copy)]
pub struct FieldExtractor {
    /// Dotted source path, for diagnostics
    pub name: &'static str,
    pub extract: fn(&Value) -> Option<f64>,
}

impl FieldExtractor {
    const fn new(name: &'static str, extract: fn(&Value) -> Option<f64>) -> Self {
        Self { name, extract }
    }
}

/// Average temperature, in priority order
pub const TEMPERATURE_AVG: [FieldExtractor; 3] = [
    FieldExtractor::new("temperature.day", temperature_day),
    FieldExtractor::new("temperature.average", temperature_average),
    FieldExtractor::new("temperature.(min+max)/2", temperature_midpoint),
];

/// Maximum wind speed, in priority order
pub const WIND_MAX: [FieldExtractor; 4] = [
    FieldExtractor::new("wind.max.speed", wind_max_speed),
    FieldExtractor::new("wind.max_speed", wind_max_speed_flat),
    FieldExtractor::new("wind_speed_max", wind_speed_max),
    FieldExtractor::new("wind_speed", wind_speed),
];

/// Total rainfall, in priority order
pub const RAIN_TOTAL: [FieldExtractor; 3] = [
    FieldExtractor::new("precipitation.total", precipitation_total),
    FieldExtractor::new("rain.total", rain_total),
    FieldExtractor::new("rain", rain_scalar),
];

/// First value produced by the chain, if any
#[must_use]
pub fn first_match(chain: &[FieldExtractor], data: &Value) -> Option<f64> {
    chain.iter().find_map(|extractor| (extractor.extract)(data))
}

/// Normalize one day summary into a [`DailyWeather`] row
#[must_use]
pub fn normalize_day_summary(day: &str, data: &Value) -> DailyWeather {
    DailyWeather {
        day: day.to_string(),
        temp_avg_c: first_match(&TEMPERATURE_AVG, data).map(round_to_tenth),
        wind_max_ms: round_to_tenth(first_match(&WIND_MAX, data).unwrap_or(0.0)),
        rain_mm: round_to_tenth(first_match(&RAIN_TOTAL, data).unwrap_or(0.0)),
    }
}

fn number_at(data: &Value, path: &[&str]) -> Option<f64> {
    path.iter()
        .try_fold(data, |value, key| value.get(key))?
        .as_f64()
}

fn temperature_day(data: &Value) -> Option<f64> {
    number_at(data, &["temperature", "day"])
}

fn temperature_average(data: &Value) -> Option<f64> {
    number_at(data, &["temperature", "average"])
}

fn temperature_midpoint(data: &Value) -> Option<f64> {
    let min = number_at(data, &["temperature", "min"])?;
    let max = number_at(data, &["temperature", "max"])?;
    Some((min + max) / 2.0)
}

fn wind_max_speed(data: &Value) -> Option<f64> {
    number_at(data, &["wind", "max", "speed"])
}

fn wind_max_speed_flat(data: &Value) -> Option<f64> {
    number_at(data, &["wind", "max_speed"])
}

fn wind_speed_max(data: &Value) -> Option<f64> {
    number_at(data, &["wind_speed_max"])
}

fn wind_speed(data: &Value) -> Option<f64> {
    number_at(data, &["wind_speed"])
}

fn precipitation_total(data: &Value) -> Option<f64> {
    number_at(data, &["precipitation", "total"])
}

fn rain_total(data: &Value) -> Option<f64> {
    number_at(data, &["rain", "total"])
}

fn rain_scalar(data: &Value) -> Option<f64> {
    number_at(data, &["rain"])
}
