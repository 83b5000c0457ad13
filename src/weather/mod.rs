//! Weather provider seam and the three-day daily weather fetch

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiKey;
use crate::dates::next_n_dates_utc;
use crate::models::{DailyWeather, GeocodingResult, Place, PollutantReading};
use crate::{Result, TripcastError};

pub mod normalize;
pub mod openweather;

pub use normalize::normalize_day_summary;
pub use openweather::OpenWeatherClient;

/// Number of days covered by the weather and air forecasts
pub const FORECAST_DAYS: usize = 3;

/// Reported when the day-summary API rejects the credential or plan
pub const DAY_SUMMARY_UNAVAILABLE: &str = "One Call 3.0 day_summary not available";

/// Remote geocoding, weather and air-quality lookups.
///
/// The credential is passed on every call so callers decide which key is
/// used and tests can inject fakes.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Direct geocoding of a free-text query, best match first
    async fn geocode(&self, query: &str, limit: u8, key: &ApiKey)
    -> Result<Vec<GeocodingResult>>;

    /// Raw daily aggregate for one date (`YYYY-MM-DD`) at a place
    async fn day_summary(&self, place: &Place, date: &str, key: &ApiKey) -> Result<Value>;

    /// Hourly air-pollution forecast for a place
    async fn air_pollution_forecast(
        &self,
        place: &Place,
        key: &ApiKey,
    ) -> Result<Vec<PollutantReading>>;
}

/// Daily weather for the next [`FORECAST_DAYS`] days starting today (UTC)
pub async fn fetch_three_day_forecast(
    provider: &dyn WeatherProvider,
    place: &Place,
    key: &ApiKey,
) -> Result<Vec<DailyWeather>> {
    let dates = next_n_dates_utc(FORECAST_DAYS);
    fetch_daily_summaries(provider, place, &dates, key).await
}

/// Fetch and normalize one day summary per date, sequentially.
///
/// A 401/403 on any date aborts the whole fetch with that status: the
/// credential or plan is wrong for every date. Any other failure only
/// affects its own date, which is emitted as a placeholder row so the
/// output always has one row per requested date.
pub async fn fetch_daily_summaries(
    provider: &dyn WeatherProvider,
    place: &Place,
    dates: &[String],
    key: &ApiKey,
) -> Result<Vec<DailyWeather>> {
    let mut out = Vec::with_capacity(dates.len());

    for date in dates {
        debug!("Fetching day summary for {} on {}", place.name, date);
        match provider.day_summary(place, date, key).await {
            Ok(data) => out.push(normalize_day_summary(date, &data)),
            Err(err) if err.is_authorization_failure() => {
                warn!("Day summary rejected for {}: {}", date, err);
                return Err(TripcastError::upstream(
                    err.status_code(),
                    DAY_SUMMARY_UNAVAILABLE,
                    None,
                ));
            }
            Err(err) => {
                warn!("Day summary for {} unavailable, using placeholder: {}", date, err);
                out.push(DailyWeather::placeholder(date.as_str()));
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers day summaries from a script keyed by date; unscripted dates fail with 500
    struct ScriptedProvider {
        days: HashMap<&'static str, std::result::Result<Value, u16>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(days: Vec<(&'static str, std::result::Result<Value, u16>)>) -> Self {
            Self {
                days: days.into_iter().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn geocode(&self, _: &str, _: u8, _: &ApiKey) -> Result<Vec<GeocodingResult>> {
            Ok(Vec::new())
        }

        async fn day_summary(&self, _: &Place, date: &str, _: &ApiKey) -> Result<Value> {
            self.calls.lock().unwrap().push(date.to_string());
            match self.days.get(date) {
                Some(Ok(value)) => Ok(value.clone()),
                Some(Err(status)) => Err(TripcastError::upstream(*status, "scripted", None)),
                None => Err(TripcastError::api("connection reset")),
            }
        }

        async fn air_pollution_forecast(
            &self,
            _: &Place,
            _: &ApiKey,
        ) -> Result<Vec<PollutantReading>> {
            Ok(Vec::new())
        }
    }

    fn place() -> Place {
        Place::new(53.35, -6.26, "Dublin".to_string(), Some("IE".to_string()))
    }

    fn key() -> ApiKey {
        ApiKey::parse(Some("test-weather-key"), "OPENWEATHER_API_KEY").unwrap()
    }

    fn dates() -> Vec<String> {
        vec![
            "2024-01-15".to_string(),
            "2024-01-16".to_string(),
            "2024-01-17".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_all_days_normalized() {
        let provider = ScriptedProvider::new(vec![
            ("2024-01-15", Ok(json!({"temperature": {"day": 5.0}, "precipitation": {"total": 0.0}}))),
            ("2024-01-16", Ok(json!({"temperature": {"day": 6.0}, "precipitation": {"total": 2.0}}))),
            ("2024-01-17", Ok(json!({"temperature": {"day": 4.0}, "wind": {"max": {"speed": 11.04}}}))),
        ]);

        let rows = fetch_daily_summaries(&provider, &place(), &dates(), &key())
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].rain_mm, 2.0);
        assert_eq!(rows[2].wind_max_ms, 11.0);
        let days: Vec<&str> = rows.iter().map(|r| r.day.as_str()).collect();
        assert_eq!(days, ["2024-01-15", "2024-01-16", "2024-01-17"]);
    }

    #[tokio::test]
    async fn test_single_day_failure_is_absorbed() {
        let provider = ScriptedProvider::new(vec![
            ("2024-01-15", Ok(json!({"temperature": {"day": 5.0}}))),
            ("2024-01-16", Err(500)),
            ("2024-01-17", Ok(json!({"temperature": {"day": 4.0}}))),
        ]);

        let rows = fetch_daily_summaries(&provider, &place(), &dates(), &key())
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], DailyWeather::placeholder("2024-01-16"));
        assert_eq!(rows[2].temp_avg_c, Some(4.0));
    }

    #[tokio::test]
    async fn test_transport_failures_still_yield_three_rows() {
        let provider = ScriptedProvider::new(Vec::new());
        let rows = fetch_daily_summaries(&provider, &place(), &dates(), &key())
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.temp_avg_c.is_none()));
    }

    #[tokio::test]
    async fn test_authorization_failure_aborts_remaining_days() {
        let provider = ScriptedProvider::new(vec![
            ("2024-01-15", Ok(json!({"temperature": {"day": 5.0}}))),
            ("2024-01-16", Err(401)),
            ("2024-01-17", Ok(json!({"temperature": {"day": 4.0}}))),
        ]);

        let err = fetch_daily_summaries(&provider, &place(), &dates(), &key())
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.user_message(), DAY_SUMMARY_UNAVAILABLE);
        assert_eq!(provider.calls(), ["2024-01-15", "2024-01-16"]);
    }

    #[tokio::test]
    async fn test_forbidden_propagates_status() {
        let provider = ScriptedProvider::new(vec![("2024-01-15", Err(403))]);
        let err = fetch_daily_summaries(&provider, &place(), &dates(), &key())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(provider.calls().len(), 1);
    }
}
