//! Location models for resolved places and city suggestions

use serde::{Deserialize, Serialize};

/// A city resolved by the geocoder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical city name
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
}

impl Place {
    /// Create a new place
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String, country: Option<String>) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country,
        }
    }

    /// Format place as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Geocoding result as returned by the OpenWeather direct geocoding API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocodingResult {
    /// Location name
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Country code
    pub country: Option<String>,
    /// State or region, when the provider knows one
    pub state: Option<String>,
}

impl From<GeocodingResult> for Place {
    fn from(geocoding: GeocodingResult) -> Self {
        Place::new(geocoding.lat, geocoding.lon, geocoding.name, geocoding.country)
    }
}

/// One autocomplete entry for the city picker
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    pub state: String,
    /// Display text, e.g. "Dublin, Leinster, IE"
    pub label: String,
}

impl From<GeocodingResult> for CitySuggestion {
    fn from(geocoding: GeocodingResult) -> Self {
        let country = geocoding.country.unwrap_or_default();
        let state = geocoding.state.unwrap_or_default();
        let label = if state.is_empty() {
            format!("{}, {}", geocoding.name, country)
        } else {
            format!("{}, {}, {}", geocoding.name, state, country)
        };

        Self {
            name: geocoding.name,
            country,
            state,
            label,
        }
    }
}
