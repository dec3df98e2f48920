//! Error types and handling for the MCP server.
//!
//! Errors raised while building the server. Tool failures never reach this
//! type; they are reported to the client as tool results.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the weather provider.
    #[error("Weather provider error: {0}")]
    Weather(#[from] crate::domains::weather::WeatherError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::weather::WeatherError;

    #[test]
    fn test_weather_error_converts() {
        let err: Error = WeatherError::Request("bad builder".to_string()).into();
        assert!(matches!(err, Error::Weather(_)));
        assert_eq!(err.to_string(), "Weather provider error: bad builder");
    }

    #[test]
    fn test_config_error_message() {
        assert_eq!(
            Error::config("QWEATHER_API_URL is empty").to_string(),
            "Configuration error: QWEATHER_API_URL is empty"
        );
    }
}
