//! City lookup tool.
//!
//! Always queries the geocoding API, even for numeric input, and lists every
//! match so the caller can pick a location ID for the other tools.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{parse_arguments, report_result};
use crate::core::config::Config;
use crate::domains::tools::error::Operation;
use crate::domains::weather::models::CityLookupResponse;
use crate::domains::weather::{CityLookup, QWeatherClient, Report, WeatherError, WeatherOptions};

/// Parameters for the city lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LookupCityParams {
    #[schemars(
        description = "The location to look up (city name, coordinates, etc.). Examples: 'London', 'New York', '39.9,116.3'"
    )]
    pub location: String,

    #[schemars(description = "Lookup configuration options, all fields are optional")]
    #[serde(default)]
    pub options: Option<LookupOptions>,
}

/// Options accepted by the city lookup tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct LookupOptions {
    #[schemars(description = "Response language code (e.g., 'en' for English, 'zh' for Chinese)")]
    #[serde(default)]
    pub language: Option<String>,
}

/// City lookup tool implementation.
#[derive(Debug, Clone)]
pub struct LookupCityTool;

impl LookupCityTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "lookupCity";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Look up city information by name, ID, or coordinates. Returns city ID that can be used with other weather tools.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(location = %params.location))]
    pub async fn execute(
        params: &LookupCityParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> CallToolResult {
        info!("Looking up city");
        report_result(
            Operation::CityLookup,
            Self::fetch_report(params, config, client).await,
        )
    }

    async fn fetch_report(
        params: &LookupCityParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> Result<String, WeatherError> {
        let language = params
            .options
            .as_ref()
            .and_then(|o| o.language.as_deref());
        let options = WeatherOptions::merge(None, language, &config.defaults);

        let response = client
            .lookup_city(&params.location, &options.language)
            .await?;

        render_lookup(&params.location, &response)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<LookupCityParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>, client: QWeatherClient) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            let client = client.clone();
            async move {
                let params: LookupCityParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &config, &client).await)
            }
            .boxed()
        })
    }
}

/// Render every geocoding match as a numbered list.
///
/// Fails with [`WeatherError::NoMatches`] naming `location` when the provider
/// found nothing.
pub fn render_lookup(location: &str, response: &CityLookupResponse) -> Result<String, WeatherError> {
    let first = response
        .location
        .first()
        .ok_or_else(|| WeatherError::NoMatches(location.to_string()))?;

    let mut report = Report::titled("Location Information");
    for (index, city) in response.location.iter().enumerate() {
        report
            .line(format_args!("{}. {} (ID: {})", index + 1, city.name, city.id))
            .line(format_args!("   Location: {}, {}", city.lat, city.lon))
            .line(format_args!(
                "   Region: {}, {}, {}",
                city.adm2, city.adm1, city.country
            ))
            .line(format_args!("   Timezone: {} (UTC {})", city.tz, city.utc_offset))
            .line(format_args!("   Type: {}, Rank: {}", city.kind, city.rank))
            .blank();
    }

    report
        .line(format_args!(
            "Note: Use the ID (e.g., \"{}\") in other weather tools to get weather information for this location.",
            first.id
        ))
        .attribution(response.refer.as_ref());

    Ok(report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> CityLookupResponse {
        serde_json::from_value(serde_json::json!({
            "code": "200",
            "location": [
                {
                    "name": "London", "id": "2643743", "lat": "51.50853", "lon": "-0.12574",
                    "adm2": "London", "adm1": "England", "country": "United Kingdom",
                    "tz": "Europe/London", "utcOffset": "+00:00", "isDst": "0",
                    "type": "city", "rank": "13", "fxLink": "https://www.qweather.com/en/weather7d/london-2643743.html"
                },
                {
                    "name": "London", "id": "6058560", "lat": "42.98339", "lon": "-81.23304",
                    "adm2": "Middlesex", "adm1": "Ontario", "country": "Canada",
                    "tz": "America/Toronto", "utcOffset": "-05:00", "isDst": "0",
                    "type": "city", "rank": "25", "fxLink": ""
                }
            ],
            "refer": {"sources": ["QWeather"], "license": ["QWeather Developers License"]}
        }))
        .unwrap()
    }

    #[test]
    fn test_location_is_required() {
        assert!(serde_json::from_str::<LookupCityParams>("{}").is_err());
        let params: LookupCityParams = serde_json::from_str(r#"{"location": "London"}"#).unwrap();
        assert_eq!(params.location, "London");
    }

    #[test]
    fn test_render_numbered_matches() {
        let text = render_lookup("London", &sample_response()).unwrap();
        let expected = "\
Location Information:

1. London (ID: 2643743)
   Location: 51.50853, -0.12574
   Region: London, England, United Kingdom
   Timezone: Europe/London (UTC +00:00)
   Type: city, Rank: 13

2. London (ID: 6058560)
   Location: 42.98339, -81.23304
   Region: Middlesex, Ontario, Canada
   Timezone: America/Toronto (UTC -05:00)
   Type: city, Rank: 25

Note: Use the ID (e.g., \"2643743\") in other weather tools to get weather information for this location.

Data Sources: QWeather
License: QWeather Developers License
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_matches_names_location() {
        let response: CityLookupResponse =
            serde_json::from_str(r#"{"code": "200", "location": []}"#).unwrap();
        let err = render_lookup("Xyzzyville", &response).unwrap_err();
        assert_eq!(err.to_string(), "No location found for: Xyzzyville");
    }
}
