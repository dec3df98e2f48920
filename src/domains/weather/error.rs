//! Weather provider error types.

use thiserror::Error;

/// Errors raised while talking to the QWeather API.
///
/// The first four variants classify transport failures. The rest describe
/// provider-level failures carried inside a successful HTTP exchange.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The server answered with a failing HTTP status.
    #[error("API responded with status {0}")]
    HttpStatus(u16),

    /// The request was sent but no response came back.
    #[error("No response received from API")]
    NoResponse,

    /// The request could not be built or sent.
    #[error("{0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The weather endpoint returned a non-success `code`.
    #[error("QWeather API Error: {0}")]
    ApiStatus(String),

    /// The geocoding endpoint returned a non-success `code`.
    #[error("QWeather GeoAPI Error: {0}")]
    GeoApiStatus(String),

    /// Geocoding succeeded but matched nothing.
    #[error("No location found for: {0}")]
    NoMatches(String),

    /// Location resolution failed before any weather call was made.
    #[error("Failed to resolve location: {0}")]
    Resolution(#[source] Box<WeatherError>),
}

impl WeatherError {
    /// Wrap an error raised while resolving a location.
    pub fn resolution(source: WeatherError) -> Self {
        Self::Resolution(Box::new(source))
    }

    /// Whether the error was raised by the location resolver.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::HttpStatus(status.as_u16())
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::NoResponse
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_wraps_inner_message() {
        let err = WeatherError::resolution(WeatherError::NoMatches("Atlantis".to_string()));
        assert!(err.is_resolution());
        assert_eq!(
            err.to_string(),
            "Failed to resolve location: No location found for: Atlantis"
        );
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            WeatherError::HttpStatus(401).to_string(),
            "API responded with status 401"
        );
        assert_eq!(
            WeatherError::ApiStatus("402".into()).to_string(),
            "QWeather API Error: 402"
        );
        assert_eq!(
            WeatherError::GeoApiStatus("404".into()).to_string(),
            "QWeather GeoAPI Error: 404"
        );
    }
}
