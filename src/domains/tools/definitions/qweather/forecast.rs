//! Multi-day forecast tool.
//!
//! The provider only serves fixed horizons, so the requested day count is
//! snapped up to the nearest [`ForecastTier`] and the surplus days are
//! dropped when rendering.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::common::{display_location, parse_arguments, rendered_count, report_result};
use crate::core::config::Config;
use crate::domains::tools::error::Operation;
use crate::domains::weather::models::{DailyData, DailyResponse, present};
use crate::domains::weather::report::{Conditions, Metric, Wind, WindLayout};
use crate::domains::weather::{
    ForecastTier, LocationResolver, QWeatherClient, Report, Units, WeatherError, WeatherOptions,
};

/// Parameters for the forecast tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetForecastParams {
    #[schemars(
        description = "The location to get weather forecast for (city name, location ID, coordinates, etc.). If not provided, default location will be used."
    )]
    #[serde(default)]
    pub location: Option<String>,

    #[schemars(description = "Forecast configuration options, all fields are optional")]
    #[serde(default)]
    pub options: Option<ForecastOptions>,
}

/// Options accepted by the forecast tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ForecastOptions {
    #[schemars(description = "Temperature units: metric (Celsius) or imperial (Fahrenheit)")]
    #[serde(default)]
    pub units: Option<Units>,

    #[schemars(
        description = "Number of days to forecast (default: 3, max: 30; the provider serves 3, 7, 10, 15 or 30 days)"
    )]
    #[serde(default)]
    pub days: Option<f64>,

    #[schemars(description = "Response language code (e.g., 'en' for English, 'zh' for Chinese)")]
    #[serde(default)]
    pub language: Option<String>,
}

/// Multi-day forecast tool implementation.
#[derive(Debug, Clone)]
pub struct GetForecastTool;

impl GetForecastTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getWeatherForecast";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get weather forecast for a location. Returns weather forecast for the next few days.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(location = ?params.location))]
    pub async fn execute(
        params: &GetForecastParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> CallToolResult {
        info!("Fetching weather forecast");
        report_result(
            Operation::Forecast,
            Self::fetch_report(params, config, client).await,
        )
    }

    async fn fetch_report(
        params: &GetForecastParams,
        config: &Config,
        client: &QWeatherClient,
    ) -> Result<String, WeatherError> {
        let opts = params.options.clone().unwrap_or_default();
        let options = WeatherOptions::merge(opts.units, opts.language.as_deref(), &config.defaults)
            .with_days(opts.days, &config.defaults);
        let days = options.days.unwrap_or(config.defaults.forecast_days);
        let tier = ForecastTier::for_days(days);
        let requested = params.location.as_deref().unwrap_or_default();

        let location_id = LocationResolver::new(client, &config.defaults.location)
            .resolve(requested, &options.language)
            .await?;

        debug!(days, tier = tier.days(), "Selected forecast tier");
        let response = client.daily(&location_id, tier, &options.language).await?;

        Ok(render_forecast(
            display_location(requested, &location_id),
            &response,
            days,
            tier,
            options.units,
        ))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetForecastParams>(),
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
                let params: GetForecastParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &config, &client).await)
            }
            .boxed()
        })
    }
}

/// Render the multi-day report, one block per day.
pub fn render_forecast(
    location: &str,
    response: &DailyResponse,
    days: u32,
    tier: ForecastTier,
    units: Units,
) -> String {
    let count = rendered_count(days, tier.days(), response.daily.len());

    let mut report = Report::titled(format_args!("Weather Forecast for {location}"));
    for (index, day) in response.daily.iter().take(count).enumerate() {
        if index > 0 {
            report.blank();
        }
        report.append(&render_day(day, units));
    }
    report.attribution(response.refer.as_ref());

    report.finish()
}

fn render_day(day: &DailyData, units: Units) -> Report {
    let mut report = Report::new();

    report
        .line(format_args!("{}:", day.fx_date))
        .line("Time Information:")
        .item(
            "Sunrise",
            format_args!("{}, Sunset: {}", or_na(&day.sunrise), or_na(&day.sunset)),
        );

    if present(&day.moonrise).is_some() || present(&day.moonset).is_some() {
        report.item(
            "Moonrise",
            format_args!("{}, Moonset: {}", or_na(&day.moonrise), or_na(&day.moonset)),
        );
    }

    if let Some(phase) = present(&day.moon_phase) {
        report.item(
            "Moon Phase",
            format_args!("{} (Icon: {})", phase, or_na(&day.moon_phase_icon)),
        );
    }

    report
        .section("Day Weather")
        .item(
            "Conditions",
            Conditions {
                text: &day.text_day,
                icon: &day.icon_day,
            },
        )
        .item(
            "Temperature Range",
            format_args!(
                "{} / {}",
                units.format_raw(&day.temp_max),
                units.format_raw(&day.temp_min)
            ),
        )
        .wind(
            &Wind {
                direction: &day.wind_dir_day,
                degrees: &day.wind360_day,
                scale: &day.wind_scale_day,
                speed: &day.wind_speed_day,
            },
            WindLayout::Paired,
        )
        .section("Night Weather")
        .item(
            "Conditions",
            Conditions {
                text: &day.text_night,
                icon: &day.icon_night,
            },
        )
        .wind(
            &Wind {
                direction: &day.wind_dir_night,
                degrees: &day.wind360_night,
                scale: &day.wind_scale_night,
                speed: &day.wind_speed_night,
            },
            WindLayout::Paired,
        )
        .section("Other Information")
        .metric(Metric::Humidity(&day.humidity))
        .metric(Metric::Precipitation(&day.precip))
        .metric(Metric::Pressure(&day.pressure))
        .metric(Metric::Visibility(&day.vis))
        .metric_opt(present(&day.cloud).map(Metric::CloudCover))
        .metric_opt(present(&day.uv_index).map(Metric::UvIndex));

    report
}

fn or_na(value: &Option<String>) -> &str {
    present(value).unwrap_or("N/A")
}
