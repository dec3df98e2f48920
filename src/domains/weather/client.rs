//! HTTP client for the QWeather weather and geocoding APIs.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::WeatherError;
use super::models::{
    CityLookupResponse, DailyResponse, HourlyResponse, NowResponse, ProviderEnvelope,
};
use super::options::ForecastTier;
use crate::core::config::QWeatherConfig;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "X-QW-Api-Key";

const USER_AGENT: &str = concat!("qweather-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Geocoding lookup, split out so the resolver can be driven without HTTP.
#[async_trait]
pub trait CityLookup: Send + Sync {
    /// Query the geocoding endpoint. Fails on a non-success provider code.
    async fn lookup_city(
        &self,
        location: &str,
        language: &str,
    ) -> Result<CityLookupResponse, WeatherError>;
}

/// Thin async wrapper over `reqwest` bound to the configured endpoints.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct QWeatherClient {
    http: reqwest::Client,
    api_base_url: String,
    geo_api_base_url: String,
    api_key: Option<String>,
}

impl QWeatherClient {
    /// Build a client from the provider configuration.
    pub fn new(config: &QWeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::Request(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            geo_api_base_url: config.geo_api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Current conditions for a resolved location ID.
    pub async fn now(&self, location_id: &str, language: &str) -> Result<NowResponse, WeatherError> {
        let url = format!("{}/weather/now", self.api_base_url);
        let resp: NowResponse = self.get(&url, location_id, language).await?;
        ensure_success(resp, WeatherError::ApiStatus)
    }

    /// Daily forecast for the given tier.
    pub async fn daily(
        &self,
        location_id: &str,
        tier: ForecastTier,
        language: &str,
    ) -> Result<DailyResponse, WeatherError> {
        let url = format!("{}/weather/{}", self.api_base_url, tier.endpoint());
        let resp: DailyResponse = self.get(&url, location_id, language).await?;
        ensure_success(resp, WeatherError::ApiStatus)
    }

    /// 24-hour hourly forecast.
    pub async fn hourly(
        &self,
        location_id: &str,
        language: &str,
    ) -> Result<HourlyResponse, WeatherError> {
        let url = format!("{}/weather/24h", self.api_base_url);
        let resp: HourlyResponse = self.get(&url, location_id, language).await?;
        ensure_success(resp, WeatherError::ApiStatus)
    }

    #[instrument(skip(self), level = "debug")]
    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        location: &str,
        language: &str,
    ) -> Result<T, WeatherError> {
        debug!("GET {}", url);

        let mut request = self
            .http
            .get(url)
            .query(&[("location", location), ("lang", language)]);

        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

impl std::fmt::Debug for QWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QWeatherClient")
            .field("api_base_url", &self.api_base_url)
            .field("geo_api_base_url", &self.geo_api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[async_trait]
impl CityLookup for QWeatherClient {
    async fn lookup_city(
        &self,
        location: &str,
        language: &str,
    ) -> Result<CityLookupResponse, WeatherError> {
        let url = format!("{}/city/lookup", self.geo_api_base_url);
        let resp: CityLookupResponse = self.get(&url, location, language).await?;
        ensure_success(resp, WeatherError::GeoApiStatus)
    }
}

fn ensure_success<T: ProviderEnvelope>(
    resp: T,
    on_error: fn(String) -> WeatherError,
) -> Result<T, WeatherError> {
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(on_error(resp.code().to_string()))
    }
}
