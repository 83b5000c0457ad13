//! Umbrella and clothing advice from a multi-day weather summary

use crate::models::{DailyWeather, PackingAdvice, PackingCategory};
use crate::round_to_tenth;

/// Below this mean temperature (°C) the trip counts as cold
pub const COLD_BELOW_C: f64 = 8.0;
/// Above this mean temperature (°C) the trip counts as hot
pub const HOT_ABOVE_C: f64 = 24.0;

/// Reduce daily weather to umbrella/clothing advice
#[must_use]
pub fn packing_advice(days: &[DailyWeather]) -> PackingAdvice {
    let umbrella = days.iter().any(|d| d.rain_mm > 0.0);

    let temps: Vec<f64> = days.iter().filter_map(|d| d.temp_avg_c).collect();
    let mean = (!temps.is_empty()).then(|| temps.iter().sum::<f64>() / temps.len() as f64);

    PackingAdvice {
        umbrella,
        packing: categorize(mean),
        mean_temp_c: mean.map(round_to_tenth),
    }
}

/// Clothing category for a mean temperature
#[must_use]
pub fn categorize(mean_temp_c: Option<f64>) -> PackingCategory {
    match mean_temp_c {
        None => PackingCategory::Unknown,
        Some(t) if t < COLD_BELOW_C => PackingCategory::Cold,
        Some(t) if t <= HOT_ABOVE_C => PackingCategory::Mild,
        Some(_) => PackingCategory::Hot,
    }
}
