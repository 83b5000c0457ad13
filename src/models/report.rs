//! Per-city report payloads returned by the API and fed to the advisor

use serde::{Deserialize, Serialize};

use super::{DailyAirSummary, DailyWeather, PackingAdvice, Place};

/// Provider tag reported with weather forecasts
pub const WEATHER_SOURCE: &str = "onecall_day_summary";

/// Three-day weather with packing advice for a city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    pub source: String,
    pub city: String,
    pub country: Option<String>,
    pub forecast: Vec<DailyWeather>,
    #[serde(flatten)]
    pub advice: PackingAdvice,
}

impl WeatherReport {
    #[must_use]
    pub fn new(place: &Place, forecast: Vec<DailyWeather>, advice: PackingAdvice) -> Self {
        Self {
            source: WEATHER_SOURCE.to_string(),
            city: place.name.clone(),
            country: place.country.clone(),
            forecast,
            advice,
        }
    }
}

/// Up to three days of air-quality summaries for a city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AirReport {
    pub city: String,
    pub country: Option<String>,
    pub forecast: Vec<DailyAirSummary>,
}

impl AirReport {
    #[must_use]
    pub fn new(place: &Place, forecast: Vec<DailyAirSummary>) -> Self {
        Self {
            city: place.name.clone(),
            country: place.country.clone(),
            forecast,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PackingCategory;
    use serde_json::json;

    #[test]
    fn test_weather_report_flattens_advice() {
        let place = Place::new(53.35, -6.26, "Dublin".to_string(), Some("IE".to_string()));
        let report = WeatherReport::new(
            &place,
            vec![DailyWeather::placeholder("2024-01-15")],
            PackingAdvice {
                umbrella: false,
                packing: PackingCategory::Unknown,
                mean_temp_c: None,
            },
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["source"], "onecall_day_summary");
        assert_eq!(value["city"], "Dublin");
        assert_eq!(value["country"], "IE");
        assert_eq!(value["umbrella"], json!(false));
        assert_eq!(value["packing"], "Unknown");
        assert!(value["mean_temp_c"].is_null());
        assert!(value.get("advice").is_none());
    }
}
