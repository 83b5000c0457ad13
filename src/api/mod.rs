//! HTTP endpoints
//!
//! Thin adapters over the library: each city route trims and checks the
//! `city` parameter, validates the credentials it needs, resolves the city
//! and then calls the weather, air-quality and advisor components.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::advisor::{self, CompletionParser, LanguageModel, OpenAiClient};
use crate::air_quality::fetch_air_summary;
use crate::config::{ApiKey, TripcastConfig};
use crate::location_resolver::LocationResolver;
use crate::models::{AirReport, CitySuggestion, Place, WeatherReport};
use crate::packing::packing_advice;
use crate::weather::{OpenWeatherClient, WeatherProvider, fetch_three_day_forecast};
use crate::{Result, TripcastError};

mod error;

/// Message returned when the `city` parameter is absent or blank
pub const MISSING_CITY: &str = "Missing ?city";

/// Message returned for any autocomplete failure after the credential check
pub const AUTOCOMPLETE_FAILED: &str = "autocomplete failed";

/// Shared, immutable application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<TripcastConfig>,
    pub weather: Arc<dyn WeatherProvider>,
    pub llm: Arc<dyn LanguageModel>,
    pub parser: Arc<dyn CompletionParser>,
}

impl AppState {
    /// Wire the reqwest-backed providers from configuration
    pub fn from_config(config: TripcastConfig) -> Result<Self> {
        let weather = Arc::new(OpenWeatherClient::new(&config.weather)?);
        let llm = Arc::new(OpenAiClient::new(&config.llm)?);
        Ok(Self::with_components(config, weather, llm))
    }

    /// Build state around explicit provider implementations
    pub fn with_components(
        config: TripcastConfig,
        weather: Arc<dyn WeatherProvider>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        let parser = advisor::parser_for(config.llm.strict_parsing);
        Self {
            config: Arc::new(config),
            weather,
            llm,
            parser,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PackResponse {
    pub city: String,
    pub country: Option<String>,
    pub checklist: Vec<String>,
    pub notes: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cities", get(get_cities))
        .route("/api/weather3", get(get_weather3))
        .route("/api/air3", get(get_air3))
        .route("/api/pack", get(get_pack))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        environment: state.config.server.environment.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn get_cities(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<CitySuggestion>>> {
    let q = query.q.as_deref().unwrap_or_default().trim();
    if !LocationResolver::is_suggestible(q) {
        return Ok(Json(Vec::new()));
    }

    let key = state.config.weather.credential()?;

    match LocationResolver::suggest_cities(state.weather.as_ref(), q, &key).await {
        Ok(suggestions) => Ok(Json(suggestions)),
        Err(err) => {
            error!("City autocomplete for '{}' failed: {}", q, err);
            Err(TripcastError::general(AUTOCOMPLETE_FAILED))
        }
    }
}

async fn get_weather3(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<WeatherReport>> {
    let city = required_city(&query)?;
    let key = state.config.weather.credential()?;
    let place = LocationResolver::resolve_city(state.weather.as_ref(), city, &key).await?;

    Ok(Json(weather_report(&state, &place, &key).await?))
}

async fn get_air3(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<AirReport>> {
    let city = required_city(&query)?;
    let key = state.config.weather.credential()?;
    let place = LocationResolver::resolve_city(state.weather.as_ref(), city, &key).await?;

    Ok(Json(air_report(&state, &place, &key).await?))
}

async fn get_pack(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<PackResponse>> {
    let city = required_city(&query)?;
    let weather_key = state.config.weather.credential()?;
    let llm_key = state.config.llm.credential()?;
    let place = LocationResolver::resolve_city(state.weather.as_ref(), city, &weather_key).await?;

    let (weather, air) = futures::try_join!(
        weather_report(&state, &place, &weather_key),
        air_report(&state, &place, &weather_key),
    )?;

    let suggestions = advisor::suggest_packing(
        state.llm.as_ref(),
        state.parser.as_ref(),
        &weather,
        &air,
        &llm_key,
    )
    .await?;

    Ok(Json(PackResponse {
        city: place.name,
        country: place.country,
        checklist: suggestions.checklist,
        notes: suggestions.notes,
    }))
}

fn required_city(query: &CityQuery) -> Result<&str> {
    let city = query.city.as_deref().unwrap_or_default().trim();
    if city.is_empty() {
        return Err(TripcastError::validation(MISSING_CITY));
    }
    Ok(city)
}

async fn weather_report(state: &AppState, place: &Place, key: &ApiKey) -> Result<WeatherReport> {
    let forecast = fetch_three_day_forecast(state.weather.as_ref(), place, key).await?;
    let advice = packing_advice(&forecast);
    Ok(WeatherReport::new(place, forecast, advice))
}

async fn air_report(state: &AppState, place: &Place, key: &ApiKey) -> Result<AirReport> {
    let forecast = fetch_air_summary(state.weather.as_ref(), place, key).await?;
    Ok(AirReport::new(place, forecast))
}
