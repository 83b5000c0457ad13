//! Air-quality forecast aggregation
//!
//! Buckets the hourly pollution forecast into UTC calendar days, keeps the
//! earliest three, and flags pollutants whose daily maximum exceeds a fixed
//! "good" ceiling.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::Result;
use crate::config::ApiKey;
use crate::dates::utc_day_of;
use crate::models::{DailyAirSummary, Place, PollutantAlert, PollutantReading};
use crate::round_to_tenth;
use crate::weather::{FORECAST_DAYS, WeatherProvider};

/// Pollutants checked for alerts, in alert order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    So2,
    O3,
    Co,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::O3,
        Pollutant::Co,
    ];

    /// Component key used by the provider
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
            Pollutant::O3 => "o3",
            Pollutant::Co => "co",
        }
    }

    /// Code uppercased with underscores stripped, e.g. "PM25"
    #[must_use]
    pub fn label(self) -> String {
        self.code().replace('_', "").to_uppercase()
    }

    /// Highest concentration (µg/m³) still considered good
    #[must_use]
    pub fn good_max(self) -> u32 {
        match self {
            Pollutant::Pm25 => 12,
            Pollutant::Pm10 => 54,
            Pollutant::No2 => 53,
            Pollutant::So2 => 35,
            Pollutant::O3 => 70,
            Pollutant::Co => 4400,
        }
    }
}

/// Summarize up to the first three UTC days present in `readings`
#[must_use]
pub fn summarize_air_forecast(readings: &[PollutantReading]) -> Vec<DailyAirSummary> {
    let mut by_day: BTreeMap<String, Vec<&PollutantReading>> = BTreeMap::new();
    for reading in readings {
        match utc_day_of(reading.dt) {
            Some(day) => by_day.entry(day).or_default().push(reading),
            None => warn!("Skipping air reading with invalid timestamp {}", reading.dt),
        }
    }

    by_day
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|(day, hours)| summarize_day(day, &hours))
        .collect()
}

fn summarize_day(day: String, hours: &[&PollutantReading]) -> DailyAirSummary {
    let aqi_max = hours
        .iter()
        .map(|r| r.aqi_or_best())
        .max()
        .unwrap_or(1);

    let alerts = Pollutant::ALL
        .iter()
        .filter_map(|&pollutant| {
            let value_max = hours
                .iter()
                .filter_map(|r| r.component(pollutant.code()))
                .reduce(f64::max)?;
            (value_max > f64::from(pollutant.good_max())).then(|| PollutantAlert {
                pollutant: pollutant.label(),
                value_max: round_to_tenth(value_max),
                good_max: pollutant.good_max(),
            })
        })
        .collect();

    DailyAirSummary {
        day,
        aqi_max,
        alerts,
    }
}

/// Fetch the hourly forecast for a place and summarize it per day
pub async fn fetch_air_summary(
    provider: &dyn WeatherProvider,
    place: &Place,
    key: &ApiKey,
) -> Result<Vec<DailyAirSummary>> {
    let readings = provider.air_pollution_forecast(place, key).await?;
    debug!(
        "Received {} hourly air readings for {}",
        readings.len(),
        place.name
    );
    Ok(summarize_air_forecast(&readings))
}
