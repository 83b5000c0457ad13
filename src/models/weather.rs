//! Daily weather summaries and the packing advice derived from them

use serde::{Deserialize, Serialize};

/// Normalized weather for one calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyWeather {
    /// Calendar date, `YYYY-MM-DD` (UTC)
    pub day: String,
    /// Average temperature in Celsius, if the provider reported one
    pub temp_avg_c: Option<f64>,
    /// Maximum wind speed in m/s
    pub wind_max_ms: f64,
    /// Total precipitation in mm
    pub rain_mm: f64,
}

impl DailyWeather {
    /// Row emitted when a single day could not be fetched
    #[must_use]
    pub fn placeholder(day: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            temp_avg_c: None,
            wind_max_ms: 0.0,
            rain_mm: 0.0,
        }
    }
}

/// Coarse clothing category for the expected temperatures
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PackingCategory {
    Cold,
    Mild,
    Hot,
    Unknown,
}

/// Umbrella and clothing advice for a multi-day window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PackingAdvice {
    pub umbrella: bool,
    pub packing: PackingCategory,
    pub mean_temp_c: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_row() {
        let row = DailyWeather::placeholder("2024-01-15");
        assert_eq!(row.day, "2024-01-15");
        assert!(row.temp_avg_c.is_none());
        assert_eq!(row.wind_max_ms, 0.0);
        assert_eq!(row.rain_mm, 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let advice = PackingAdvice {
            umbrella: true,
            packing: PackingCategory::Cold,
            mean_temp_c: Some(5.0),
        };
        let json = serde_json::to_value(&advice).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"umbrella": true, "packing": "Cold", "mean_temp_c": 5.0})
        );

        let row = serde_json::to_value(DailyWeather::placeholder("2024-01-15")).unwrap();
        assert_eq!(row["temp_avg_c"], serde_json::Value::Null);
    }
}
