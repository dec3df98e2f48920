//! Current weather tool.
//!
//! Resolves the location, reads the provider's `weather/now` endpoint and
//! renders a sectioned report of the current conditions.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{display_location, parse_arguments, parse_celsius, report_result};
use crate::core::config::Config;
use crate::domains::tools::error::Operation;
use crate::domains::weather::models::{NowResponse, present};
use crate::domains::weather::report::{Conditions, Metric, Wind, WindLayout};
use crate::domains::weather::{
    LocationResolver, QWeatherClient, Report, Units, WeatherError, WeatherOptions,
};

/// Parameters for the current weather tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetWeatherParams {
    /// Location to get weather for.
    #[schemars(
        description = "The location to get weather for (city name, location ID, coordinates, etc.). If not provided, default location will be used."
    )]
    #[serde(default)]
    pub location: Option<String>,

    #[schemars(description = "Weather configuration options, all fields are optional")]
    #[serde(default)]
    pub options: Option<CurrentWeatherOptions>,
}

/// Options accepted by the current weather tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CurrentWeatherOptions {
    #[schemars(description = "Temperature units: metric (Celsius) or imperial (Fahrenheit)")]
    #[serde(default)]
    pub units: Option<Units>,

    #[schemars(
        description = "Response language code (e.g., 'en' for English, 'es' for Spanish, 'zh' for Chinese)"
    )]
    #[serde(default)]
    pub language: Option<String>,
}

/// Current weather tool implementation.
#[derive(Debug, Clone)]
pub struct GetWeatherTool;

impl GetWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getWeather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get current weather information for a location. Returns weather data including temperature, humidity, and conditions.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(location = ?params.location))]
    pub async fn execute(
        params: &GetWeatherParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> CallToolResult {
        info!("Fetching current weather");
        report_result(
            Operation::CurrentWeather,
            Self::fetch_report(params, config, client).await,
        )
    }

    async fn fetch_report(
        params: &GetWeatherParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> Result<String, WeatherError> {
        let opts = params.options.clone().unwrap_or_default();
        let options = WeatherOptions::merge(opts.units, opts.language.as_deref(), &config.defaults);
        let requested = params.location.as_deref().unwrap_or_default();

        let location_id = LocationResolver::new(client, &config.defaults.location)
            .resolve(requested, &options.language)
            .await?;

        let response = client.now(&location_id, &options.language).await?;

        render_current(
            display_location(requested, &location_id),
            &response,
            options.units,
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetWeatherParams>(),
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
                let params: GetWeatherParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &config, &client).await)
            }
            .boxed()
        })
    }
}

/// Render the current-conditions report.
pub fn render_current(
    location: &str,
    response: &NowResponse,
    units: Units,
) -> Result<String, WeatherError> {
    let now = response
        .now
        .as_ref()
        .ok_or_else(|| WeatherError::InvalidResponse("missing `now` block".to_string()))?;

    let temperature = parse_celsius("temp", &now.temp)?;
    let feels_like = parse_celsius("feelsLike", &now.feels_like)?;

    let cloud = present(&now.cloud)
        .filter(|v| v.parse::<f64>().is_ok())
        .map(Metric::CloudCover);
    let dew_point = present(&now.dew)
        .filter(|v| v.parse::<f64>().is_ok())
        .map(|v| Metric::DewPoint(units.format_raw(v)));

    let mut report = Report::titled(format_args!("Weather for {location}"));
    report
        .line(format_args!("Observation Time: {}", now.obs_time))
        .line(format_args!(
            "Current Conditions: {}",
            Conditions {
                text: &now.text,
                icon: &now.icon,
            }
        ))
        .line(format_args!("Temperature: {}", units.format_fixed(temperature)))
        .line(format_args!("Feels Like: {}", units.format_fixed(feels_like)))
        .section("Wind Information")
        .wind(
            &Wind {
                direction: &now.wind_dir,
                degrees: &now.wind360,
                scale: &now.wind_scale,
                speed: &now.wind_speed,
            },
            WindLayout::Expanded,
        )
        .section("Other Information")
        .metric(Metric::Humidity(&now.humidity))
        .metric(Metric::Precipitation(&now.precip))
        .metric(Metric::Pressure(&now.pressure))
        .metric(Metric::Visibility(&now.vis))
        .metric_opt(cloud)
        .metric_opt(dew_point)
        .blank()
        .line(format_args!("Updated: {}", response.update_time))
        .attribution(response.refer.as_ref());

    Ok(report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> NowResponse {
        serde_json::from_value(serde_json::json!({
            "code": "200",
            "updateTime": "2020-06-30T22:00+08:00",
            "now": {
                "obsTime": "2020-06-30T21:40+08:00",
                "temp": "20",
                "feelsLike": "19",
                "icon": "101",
                "text": "Cloudy",
                "wind360": "123",
                "windDir": "SE",
                "windScale": "1",
                "windSpeed": "3",
                "humidity": "72",
                "precip": "0.0",
                "pressure": "1003",
                "vis": "16",
                "cloud": "10",
                "dew": "21"
            },
            "refer": {
                "sources": ["QWeather"],
                "license": ["QWeather Developers License"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_params_deserialize_nested_options() {
        let json = r#"{"location": "London", "options": {"units": "imperial", "language": "en"}}"#;
        let params: GetWeatherParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.location.as_deref(), Some("London"));
        let options = params.options.unwrap();
        assert_eq!(options.units, Some(Units::Imperial));
        assert_eq!(options.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_params_all_optional() {
        let params: GetWeatherParams = serde_json::from_str("{}").unwrap();
        assert!(params.location.is_none());
        assert!(params.options.is_none());
    }

    #[test]
    fn test_render_metric_report() {
        let text = render_current("Beijing", &sample_response(), Units::Metric).unwrap();
        let expected = "\
Weather for Beijing:

Observation Time: 2020-06-30T21:40+08:00
Current Conditions: Cloudy (Icon: 101)
Temperature: 20.0°C
Feels Like: 19.0°C

Wind Information:
- Direction: SE (123°)
- Scale: 1
- Speed: 3 km/h

Other Information:
- Humidity: 72%
- Precipitation: 0.0 mm
- Pressure: 1003 hPa
- Visibility: 16 km
- Cloud Cover: 10%
- Dew Point: 21°C

Updated: 2020-06-30T22:00+08:00

Data Sources: QWeather
License: QWeather Developers License
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_imperial_converts_temperatures() {
        let text = render_current("Beijing", &sample_response(), Units::Imperial).unwrap();
        assert!(text.contains("Temperature: 68.0°F\n"));
        assert!(text.contains("Feels Like: 66.2°F\n"));
        assert!(text.contains("Dew Point: 69.8°F\n"));
    }

    #[test]
    fn test_render_omits_missing_cloud_cover() {
        let mut response = sample_response();
        if let Some(now) = response.now.as_mut() {
            now.cloud = None;
            now.dew = Some(String::new());
        }
        let text = render_current("Beijing", &response, Units::Metric).unwrap();
        assert!(!text.contains("Cloud Cover"));
        assert!(!text.contains("Dew Point"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let response = sample_response();
        let first = render_current("Beijing", &response, Units::Imperial).unwrap();
        let second = render_current("Beijing", &response, Units::Imperial).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_without_now_block_fails() {
        let response: NowResponse = serde_json::from_str(r#"{"code": "200"}"#).unwrap();
        let err = render_current("Beijing", &response, Units::Metric).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = GetWeatherTool::to_tool();
        assert_eq!(tool.name, "getWeather");
        assert!(tool.input_schema.contains_key("properties"));
    }
}
