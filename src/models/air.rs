//! Air-quality readings and their daily summaries

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One hourly entry of the air-pollution forecast.
///
/// `main` and `components` are kept raw: a single off-shape entry must not
/// fail decoding of the whole forecast.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PollutantReading {
    /// Unix timestamp (seconds)
    pub dt: i64,
    /// `{ "aqi": 1..=5 }`
    #[serde(default)]
    pub main: Value,
    /// Pollutant code -> concentration (µg/m³)
    #[serde(default)]
    pub components: Value,
}

impl PollutantReading {
    /// AQI of this reading; a missing or non-numeric index counts as the best
    /// category
    #[must_use]
    pub fn aqi_or_best(&self) -> u8 {
        self.main
            .get("aqi")
            .and_then(number)
            .filter(|aqi| aqi.is_finite())
            .map_or(1, |aqi| aqi.round().clamp(0.0, f64::from(u8::MAX)) as u8)
    }

    /// Numeric concentration for a component code, if present
    #[must_use]
    pub fn component(&self, code: &str) -> Option<f64> {
        self.components.as_object()?.get(code)?.as_f64()
    }
}

/// A JSON number, or a string holding one
fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str()?.trim().parse().ok())
}

/// Worst air quality seen on one calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyAirSummary {
    /// Calendar date, `YYYY-MM-DD` (UTC)
    pub day: String,
    pub aqi_max: u8,
    pub alerts: Vec<PollutantAlert>,
}

/// A pollutant whose daily maximum exceeded its "good" ceiling
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PollutantAlert {
    /// Display code, e.g. "PM25"
    pub pollutant: String,
    pub value_max: f64,
    pub good_max: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reading_deserializes_provider_shape() {
        let reading: PollutantReading = serde_json::from_value(json!({
            "dt": 1_700_000_000,
            "main": {"aqi": 3},
            "components": {"pm2_5": 14.2, "co": 230.31, "nh3": "n/a"}
        }))
        .unwrap();

        assert_eq!(reading.aqi_or_best(), 3);
        assert_eq!(reading.component("pm2_5"), Some(14.2));
        assert_eq!(reading.component("nh3"), None);
        assert_eq!(reading.component("o3"), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let reading: PollutantReading = serde_json::from_value(json!({"dt": 0})).unwrap();
        assert_eq!(reading.aqi_or_best(), 1);
        assert!(reading.components.is_null());

        let empty_main: PollutantReading =
            serde_json::from_value(json!({"dt": 0, "main": {}})).unwrap();
        assert_eq!(empty_main.aqi_or_best(), 1);
    }

    #[test]
    fn test_off_shape_entries_still_decode() {
        let readings: Vec<PollutantReading> = serde_json::from_value(json!([
            {"dt": 0, "main": {"aqi": 2.0}, "components": [1, 2]},
            {"dt": 0, "main": {"aqi": "3"}, "components": "n/a"},
            {"dt": 0, "main": {"aqi": true}, "components": null},
            {"dt": 0, "main": "bad", "components": {"pm10": 60.0}},
            {"dt": 0, "main": {"aqi": 4}}
        ]))
        .unwrap();

        let aqi: Vec<u8> = readings.iter().map(PollutantReading::aqi_or_best).collect();
        assert_eq!(aqi, [2, 3, 1, 1, 4]);
        assert_eq!(readings[0].component("pm10"), None);
        assert_eq!(readings[1].component("pm10"), None);
        assert_eq!(readings[3].component("pm10"), Some(60.0));
    }
}
