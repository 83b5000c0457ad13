//! OpenWeather API client
//!
//! Geocoding (`/geo/1.0/direct`), One Call 3.0 day summaries
//! (`/data/3.0/onecall/day_summary`) and the air-pollution forecast
//! (`/data/2.5/air_pollution/forecast`) share one base URL and one key.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::WeatherProvider;
use crate::config::{ApiKey, WeatherConfig};
use crate::models::{GeocodingResult, Place, PollutantReading};
use crate::{Result, TripcastError};

/// reqwest-backed [`WeatherProvider`] for OpenWeather
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
}

/// Air-pollution forecast envelope
#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    #[serde(default)]
    list: Vec<PollutantReading>,
}

impl OpenWeatherClient {
    /// Create a new client for the configured base URL
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tripcast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripcastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path?query&appid=...` and decode the JSON body.
    ///
    /// `path` is logged, the query is not: it carries the credential.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
        key: &ApiKey,
    ) -> Result<T> {
        let url = format!(
            "{}{}?{}&appid={}",
            self.base_url,
            path,
            query,
            urlencoding::encode(key.as_str())
        );

        let start = Instant::now();
        // Strip the URL from transport errors, its query carries the key
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        debug!(
            "GET {} -> {} in {:.3}s",
            path,
            status,
            start.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<Value>(&text).ok();
            let message = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .map_or_else(
                    || format!("OpenWeather request to {path} failed with status {status}"),
                    str::to_string,
                );
            return Err(TripcastError::upstream(status.as_u16(), message, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| {
                TripcastError::parse(format!("Invalid response from {path}: {}", e.without_url()))
            })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self, key))]
    async fn geocode(
        &self,
        query: &str,
        limit: u8,
        key: &ApiKey,
    ) -> Result<Vec<GeocodingResult>> {
        let params = format!("q={}&limit={}", urlencoding::encode(query), limit);
        let data: Value = self.get_json("/geo/1.0/direct", &params, key).await?;

        // Anything but an array means "no match"
        let Value::Array(_) = data else {
            warn!("Unexpected geocoding payload for '{}'", query);
            return Ok(Vec::new());
        };

        serde_json::from_value(data)
            .map_err(|e| TripcastError::parse(format!("Invalid geocoding result: {e}")))
    }

    #[instrument(skip(self, place, key), fields(place = %place.name))]
    async fn day_summary(&self, place: &Place, date: &str, key: &ApiKey) -> Result<Value> {
        let params = format!(
            "lat={}&lon={}&date={}&units=metric",
            place.latitude,
            place.longitude,
            urlencoding::encode(date)
        );
        self.get_json("/data/3.0/onecall/day_summary", &params, key)
            .await
    }

    #[instrument(skip(self, place, key), fields(place = %place.name))]
    async fn air_pollution_forecast(
        &self,
        place: &Place,
        key: &ApiKey,
    ) -> Result<Vec<PollutantReading>> {
        let params = format!("lat={}&lon={}", place.latitude, place.longitude);
        let response: AirPollutionResponse = self
            .get_json("/data/2.5/air_pollution/forecast", &params, key)
            .await?;
        Ok(response.list)
    }
}
