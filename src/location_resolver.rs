//! Location Resolution Module
//!
//! Resolves free-text city names into [`Place`]s and produces autocomplete
//! suggestions, both through the weather provider's geocoder.

use tracing::debug;

use crate::config::ApiKey;
use crate::models::{CitySuggestion, Place};
use crate::weather::WeatherProvider;
use crate::{Result, TripcastError};

/// Queries shorter than this (in characters, after trimming) get no suggestions
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Number of autocomplete suggestions requested from the geocoder
pub const SUGGESTION_LIMIT: u8 = 5;

/// Message used when the geocoder has no match
pub const CITY_NOT_FOUND: &str = "City not found";

/// Service for resolving city inputs
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a city name to its best geocoder match.
    ///
    /// Returns a not-found error when the geocoder has no result.
    pub async fn resolve_city(
        provider: &dyn WeatherProvider,
        city: &str,
        key: &ApiKey,
    ) -> Result<Place> {
        debug!("Geocoding city name: {}", city);

        let place = provider
            .geocode(city, 1, key)
            .await?
            .into_iter()
            .next()
            .map(Place::from)
            .ok_or_else(|| TripcastError::not_found(CITY_NOT_FOUND))?;

        debug!(
            "Resolved city: {} ({}) at {}",
            place.name,
            place.country.as_deref().unwrap_or("?"),
            place.format_coordinates()
        );

        Ok(place)
    }

    /// Autocomplete suggestions for a partial city name
    pub async fn suggest_cities(
        provider: &dyn WeatherProvider,
        query: &str,
        key: &ApiKey,
    ) -> Result<Vec<CitySuggestion>> {
        let results = provider.geocode(query, SUGGESTION_LIMIT, key).await?;
        debug!("Found {} suggestions for '{}'", results.len(), query);
        Ok(results.into_iter().map(CitySuggestion::from).collect())
    }

    /// Whether a (trimmed) query is long enough to look up
    #[must_use]
    pub fn is_suggestible(query: &str) -> bool {
        query.chars().count() >= MIN_SUGGESTION_QUERY_LEN
    }
}
