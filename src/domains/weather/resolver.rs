//! Location resolution: free text to provider location ID.

use tracing::{debug, instrument};

use super::client::CityLookup;
use super::error::WeatherError;

/// Whether `location` is already a provider ID (ASCII digits only).
pub fn is_location_id(location: &str) -> bool {
    !location.is_empty() && location.bytes().all(|b| b.is_ascii_digit())
}

/// Resolves caller-supplied location text to a provider location ID.
pub struct LocationResolver<'a, L: CityLookup + ?Sized> {
    lookup: &'a L,
    default_location: &'a str,
}

impl<'a, L: CityLookup + ?Sized> LocationResolver<'a, L> {
    pub fn new(lookup: &'a L, default_location: &'a str) -> Self {
        Self {
            lookup,
            default_location,
        }
    }

    /// Resolve `location` to a provider ID.
    ///
    /// Empty input uses the configured default and numeric input is returned
    /// as is. Anything else costs one geocoding call and yields the first
    /// match. Every failure comes back as [`WeatherError::Resolution`].
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve(&self, location: &str, language: &str) -> Result<String, WeatherError> {
        let location = match location.trim() {
            "" => self.default_location,
            trimmed => trimmed,
        };

        if is_location_id(location) {
            debug!("Using location ID as is: {}", location);
            return Ok(location.to_string());
        }

        let response = self
            .lookup
            .lookup_city(location, language)
            .await
            .map_err(WeatherError::resolution)?;

        let first = response.location.into_iter().next().ok_or_else(|| {
            WeatherError::resolution(WeatherError::NoMatches(location.to_string()))
        })?;

        debug!("Resolved '{}' to {} ({})", location, first.id, first.name);
        Ok(first.id)
    }
}
