//! Hourly forecast tool.

use std::sync::Arc;

use chrono::DateTime;
use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{display_location, parse_arguments, rendered_count, report_result};
use crate::core::config::Config;
use crate::domains::tools::error::Operation;
use crate::domains::weather::models::{HourlyResponse, present};
use crate::domains::weather::options::MAX_FORECAST_HOURS;
use crate::domains::weather::report::{Conditions, Metric, Wind, WindLayout};
use crate::domains::weather::{
    LocationResolver, QWeatherClient, Report, Units, WeatherError, WeatherOptions,
};

/// Parameters for the hourly forecast tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetHourlyParams {
    #[schemars(
        description = "The location to get hourly weather forecast for (city name, location ID, coordinates, etc.). If not provided, default location will be used."
    )]
    #[serde(default)]
    pub location: Option<String>,

    #[schemars(description = "Hourly forecast configuration options, all fields are optional")]
    #[serde(default)]
    pub options: Option<HourlyOptions>,
}

/// Options accepted by the hourly forecast tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct HourlyOptions {
    #[schemars(description = "Temperature units: metric (Celsius) or imperial (Fahrenheit)")]
    #[serde(default)]
    pub units: Option<Units>,

    #[schemars(description = "Number of hours to forecast (default: 24, max: 24)")]
    #[serde(default)]
    pub hours: Option<f64>,

    #[schemars(description = "Response language code (e.g., 'en' for English, 'zh' for Chinese)")]
    #[serde(default)]
    pub language: Option<String>,
}

/// Hourly forecast tool implementation.
#[derive(Debug, Clone)]
pub struct GetHourlyTool;

impl GetHourlyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getHourlyWeather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get hourly weather forecast for a location. Returns weather data hour by hour for the next 24 hours.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(location = ?params.location))]
    pub async fn execute(
        params: &GetHourlyParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> CallToolResult {
        info!("Fetching hourly forecast");
        report_result(
            Operation::HourlyForecast,
            Self::fetch_report(params, config, client).await,
        )
    }

    async fn fetch_report(
        params: &GetHourlyParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> Result<String, WeatherError> {
        let opts = params.options.clone().unwrap_or_default();
        let options = WeatherOptions::merge(opts.units, opts.language.as_deref(), &config.defaults)
            .with_hours(opts.hours);
        let hours = options.hours.unwrap_or(MAX_FORECAST_HOURS);
        let requested = params.location.as_deref().unwrap_or_default();

        let location_id = LocationResolver::new(client, &config.defaults.location)
            .resolve(requested, &options.language)
            .await?;

        let response = client.hourly(&location_id, &options.language).await?;

        Ok(render_hourly(
            display_location(requested, &location_id),
            &response,
            hours,
            options.units,
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetHourlyParams>(),
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
                let params: GetHourlyParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &config, &client).await)
            }
            .boxed()
        })
    }
}

/// Render the hourly report.
pub fn render_hourly(location: &str, response: &HourlyResponse, hours: u32, units: Units) -> String {
    let count = rendered_count(hours, MAX_FORECAST_HOURS, response.hourly.len());

    let mut report = Report::titled(format_args!("Hourly Weather Forecast for {location}"));
    report
        .line(format_args!("Updated: {}", response.update_time))
        .blank();

    for hour in response.hourly.iter().take(count) {
        let (date, time) = split_forecast_time(&hour.fx_time);
        report
            .line(format_args!("{date} {time}:"))
            .item(
                "Weather",
                Conditions {
                    text: &hour.text,
                    icon: &hour.icon,
                },
            )
            .item("Temperature", units.format_raw(&hour.temp))
            .wind(
                &Wind {
                    direction: &hour.wind_dir,
                    degrees: &hour.wind360,
                    scale: &hour.wind_scale,
                    speed: &hour.wind_speed,
                },
                WindLayout::Inline,
            )
            .metric(Metric::Humidity(&hour.humidity))
            .metric_opt(present(&hour.pop).map(Metric::PrecipitationProbability))
            .metric(Metric::Precipitation(&hour.precip))
            .metric(Metric::Pressure(&hour.pressure))
            .metric_opt(present(&hour.cloud).map(Metric::CloudCover))
            .metric_opt(present(&hour.dew).map(|dew| Metric::DewPoint(units.format_raw(dew))))
            .blank();
    }

    report.attribution(response.refer.as_ref());
    report.finish()
}

/// Split a provider timestamp such as `2021-02-16T15:00+08:00` into its date
/// and a 12-hour wall-clock time (`03:00 PM`) at the timestamp's own offset.
pub fn split_forecast_time(fx_time: &str) -> (&str, String) {
    let (date, raw_time) = fx_time.split_once('T').unwrap_or((fx_time, ""));

    let time = DateTime::parse_from_rfc3339(fx_time)
        .or_else(|_| DateTime::parse_from_str(fx_time, "%Y-%m-%dT%H:%M%:z"))
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|_| raw_time.to_string());

    (date, time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hour(time: &str, pop: Option<&str>, dew: Option<&str>) -> serde_json::Value {
        let mut hour = serde_json::json!({
            "fxTime": time,
            "temp": "2",
            "icon": "150",
            "text": "Clear",
            "wind360": "335",
            "windDir": "NW",
            "windScale": "3-4",
            "windSpeed": "20",
            "humidity": "11",
            "precip": "0.0",
            "pressure": "1025",
            "cloud": "0"
        });
        if let Some(pop) = pop {
            hour["pop"] = serde_json::json!(pop);
        }
        if let Some(dew) = dew {
            hour["dew"] = serde_json::json!(dew);
        }
        hour
    }

    fn sample_response(hours: usize) -> HourlyResponse {
        let hourly: Vec<_> = (0..hours)
            .map(|i| sample_hour(&format!("2021-02-16T{:02}:00+08:00", i % 24), Some("0"), Some("-25")))
            .collect();
        serde_json::from_value(serde_json::json!({
            "code": "200",
            "updateTime": "2021-02-16T13:35+08:00",
            "hourly": hourly,
            "refer": {"sources": ["QWeather"], "license": ["QWeather Developers License"]}
        }))
        .unwrap()
    }

    #[test]
    fn test_params_accept_any_hour_number() {
        let defaults = crate::core::config::WeatherDefaults::default();
        let cases = [
            (r#"{"options": {"hours": 48.0}}"#, 24),
            (r#"{"options": {"hours": -3}}"#, 24),
            (r#"{"options": {"hours": 5.5}}"#, 5),
            (r#"{"options": {"hours": 1e10}}"#, 24),
        ];
        for (json, expected) in cases {
            let params: GetHourlyParams = serde_json::from_str(json).unwrap();
            let hours = params.options.unwrap().hours;
            let options = WeatherOptions::merge(None, None, &defaults).with_hours(hours);
            assert_eq!(options.hours, Some(expected), "{json}");
        }
    }

    #[test]
    fn test_split_forecast_time() {
        assert_eq!(
            split_forecast_time("2021-02-16T15:00+08:00"),
            ("2021-02-16", "03:00 PM".to_string())
        );
        assert_eq!(
            split_forecast_time("2021-02-16T00:00+08:00"),
            ("2021-02-16", "12:00 AM".to_string())
        );
        assert_eq!(
            split_forecast_time("2021-02-16T12:30:00Z"),
            ("2021-02-16", "12:30 PM".to_string())
        );
    }

    #[test]
    fn test_split_forecast_time_unparsable() {
        assert_eq!(
            split_forecast_time("2021-02-16Tlater"),
            ("2021-02-16", "later".to_string())
        );
    }

    #[test]
    fn test_render_hour_block() {
        let response: HourlyResponse = serde_json::from_value(serde_json::json!({
            "code": "200",
            "updateTime": "2021-02-16T13:35+08:00",
            "hourly": [sample_hour("2021-02-16T15:00+08:00", Some("7"), Some("-25"))]
        }))
        .unwrap();

        let text = render_hourly("Beijing", &response, 24, Units::Metric);
        let expected = "\
Hourly Weather Forecast for Beijing:

Updated: 2021-02-16T13:35+08:00

2021-02-16 03:00 PM:
- Weather: Clear (Icon: 150)
- Temperature: 2°C
- Wind: NW (335°), Scale: 3-4, Speed: 20 km/h
- Humidity: 11%
- Precipitation Probability: 7%
- Precipitation: 0.0 mm
- Pressure: 1025 hPa
- Cloud Cover: 0%
- Dew Point: -25°C

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_imperial_temperature_and_dew_point() {
        let text = render_hourly("Beijing", &sample_response(1), 24, Units::Imperial);
        assert!(text.contains("- Temperature: 35.6°F\n"));
        assert!(text.contains("- Dew Point: -13.0°F\n"));
    }

    #[test]
    fn test_optional_blocks_omitted() {
        let response: HourlyResponse = serde_json::from_value(serde_json::json!({
            "code": "200",
            "updateTime": "2021-02-16T13:35+08:00",
            "hourly": [sample_hour("2021-02-16T15:00+08:00", None, None)]
        }))
        .unwrap();

        let text = render_hourly("Beijing", &response, 24, Units::Imperial);
        assert!(!text.contains("Precipitation Probability"));
        assert!(!text.contains("Dew Point"));
    }

    #[test]
    fn test_render_count_limited() {
        let text = render_hourly("Beijing", &sample_response(24), 6, Units::Metric);
        assert_eq!(text.matches("- Weather:").count(), 6);

        let text = render_hourly("Beijing", &sample_response(3), 24, Units::Metric);
        assert_eq!(text.matches("- Weather:").count(), 3);
    }

    #[test]
    fn test_attribution_after_last_hour() {
        let text = render_hourly("Beijing", &sample_response(1), 24, Units::Metric);
        assert!(text.ends_with(
            "- Dew Point: -25°C\n\nData Sources: QWeather\nLicense: QWeather Developers License\n"
        ));
    }
}
