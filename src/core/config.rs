//! Configuration management for the MCP server.
//!
//! One immutable [`Config`] is built at startup, usually from environment
//! variables, and shared as `Arc<Config>` with the tools.

use super::transport::TransportConfig;
use crate::domains::weather::Units;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://devapi.qweather.com/v7";
pub const DEFAULT_GEO_API_BASE_URL: &str = "https://geoapi.qweather.com/v2";

/// Beijing.
pub const DEFAULT_LOCATION: &str = "101010100";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_FORECAST_DAYS: u32 = 3;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// QWeather endpoints and credentials.
    pub qweather: QWeatherConfig,

    /// Defaults applied when a tool call leaves an option out.
    pub defaults: WeatherDefaults,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// QWeather API access.
#[derive(Clone, Serialize, Deserialize)]
pub struct QWeatherConfig {
    /// Sent as `X-QW-Api-Key` on every request.
    pub api_key: Option<String>,

    /// Weather API base, e.g. `https://devapi.qweather.com/v7`.
    pub api_base_url: String,

    /// Geocoding API base, e.g. `https://geoapi.qweather.com/v2`.
    pub geo_api_base_url: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for QWeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QWeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base_url", &self.api_base_url)
            .field("geo_api_base_url", &self.geo_api_base_url)
            .finish()
    }
}

impl Default for QWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            geo_api_base_url: DEFAULT_GEO_API_BASE_URL.to_string(),
        }
    }
}

/// Per-call option defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDefaults {
    /// Location ID used when a call gives no location.
    pub location: String,

    pub units: Units,

    pub language: String,

    /// Forecast horizon when `days` is not supplied.
    pub forecast_days: u32,

    /// Read from `WEATHER_INCLUDE_DETAILS`; no tool consults it yet.
    pub include_details: bool,
}

impl Default for WeatherDefaults {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            units: Units::Metric,
            language: DEFAULT_LANGUAGE.to_string(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            include_details: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "weather-api-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            qweather: QWeatherConfig::default(),
            defaults: WeatherDefaults::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables (and `.env`, if any).
    ///
    /// Provider settings use the `QWEATHER_` and `WEATHER_` prefixes, server
    /// settings the `MCP_` prefix.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        match non_empty_var("QWEATHER_API_KEY") {
            Some(key) => {
                config.qweather.api_key = Some(key);
                info!("QWeather API key loaded from environment");
            }
            None => warn!(
                "QWEATHER_API_KEY not set - requests will be sent without an API key \
                 and will likely be rejected by QWeather"
            ),
        }

        if let Some(url) = non_empty_var("QWEATHER_API_URL") {
            config.qweather.api_base_url = url;
        }

        if let Some(url) = non_empty_var("QWEATHER_GEO_API_URL") {
            config.qweather.geo_api_base_url = url;
        }

        if let Some(location) = non_empty_var("WEATHER_DEFAULT_LOCATION") {
            config.defaults.location = location;
        }

        if let Some(units) = non_empty_var("WEATHER_DEFAULT_UNITS") {
            config.defaults.units = Units::from_name(&units);
        }

        if let Some(language) = non_empty_var("WEATHER_DEFAULT_LANGUAGE") {
            config.defaults.language = language;
        }

        if let Some(days) = non_empty_var("WEATHER_FORECAST_DAYS") {
            config.defaults.forecast_days = days
                .trim()
                .parse()
                .ok()
                .filter(|d| *d > 0)
                .unwrap_or(DEFAULT_FORECAST_DAYS);
        }

        config.defaults.include_details =
            std::env::var("WEATHER_INCLUDE_DETAILS").is_ok_and(|v| v == "true");

        config
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    const WEATHER_VARS: [&str; 8] = [
        "QWEATHER_API_KEY",
        "QWEATHER_API_URL",
        "QWEATHER_GEO_API_URL",
        "WEATHER_DEFAULT_LOCATION",
        "WEATHER_DEFAULT_UNITS",
        "WEATHER_DEFAULT_LANGUAGE",
        "WEATHER_FORECAST_DAYS",
        "WEATHER_INCLUDE_DETAILS",
    ];

    fn clear_weather_vars() {
        for key in WEATHER_VARS {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_weather_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_weather_vars();
        unsafe {
            std::env::set_var("QWEATHER_API_KEY", "test_key_12345");
            std::env::set_var("QWEATHER_API_URL", "http://localhost:9000/v7");
            std::env::set_var("WEATHER_DEFAULT_LOCATION", "101020100");
            std::env::set_var("WEATHER_DEFAULT_UNITS", "imperial");
            std::env::set_var("WEATHER_DEFAULT_LANGUAGE", "zh");
            std::env::set_var("WEATHER_FORECAST_DAYS", "7");
            std::env::set_var("WEATHER_INCLUDE_DETAILS", "true");
        }

        let config = Config::from_env();

        assert_eq!(config.qweather.api_key.as_deref(), Some("test_key_12345"));
        assert_eq!(config.qweather.api_base_url, "http://localhost:9000/v7");
        assert_eq!(config.qweather.geo_api_base_url, DEFAULT_GEO_API_BASE_URL);
        assert_eq!(config.defaults.location, "101020100");
        assert_eq!(config.defaults.units, Units::Imperial);
        assert_eq!(config.defaults.language, "zh");
        assert_eq!(config.defaults.forecast_days, 7);
        assert!(config.defaults.include_details);

        clear_weather_vars();
    }

    #[test]
    fn test_defaults_when_env_unset() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_weather_vars();

        let config = Config::from_env();

        assert!(config.qweather.api_key.is_none());
        assert_eq!(config.qweather.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.defaults.location, DEFAULT_LOCATION);
        assert_eq!(config.defaults.units, Units::Metric);
        assert_eq!(config.defaults.language, "en");
        assert_eq!(config.defaults.forecast_days, 3);
        assert!(!config.defaults.include_details);
    }

    #[test]
    fn test_invalid_forecast_days_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_weather_vars();
        unsafe {
            std::env::set_var("WEATHER_FORECAST_DAYS", "soon");
        }

        let config = Config::from_env();
        assert_eq!(config.defaults.forecast_days, DEFAULT_FORECAST_DAYS);

        clear_weather_vars();
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let qweather = QWeatherConfig {
            api_key: Some("super_secret_key".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", qweather);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
