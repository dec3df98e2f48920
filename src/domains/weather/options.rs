//! Per-call weather options, unit conversion and forecast tiers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::config::WeatherDefaults;

/// Upper bound accepted for `days`.
pub const MAX_FORECAST_DAYS: u32 = 30;

/// The hourly endpoint never returns more than this many entries.
pub const MAX_FORECAST_HOURS: u32 = 24;

/// Temperature unit system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum Units {
    /// Celsius
    #[default]
    Metric,
    /// Fahrenheit
    Imperial,
}

impl Units {
    /// Parse a configured unit name. Anything but `imperial` means metric.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("imperial") {
            Self::Imperial
        } else {
            Self::Metric
        }
    }

    pub fn is_imperial(self) -> bool {
        matches!(self, Self::Imperial)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// Convert a Celsius reading into this unit system.
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            Self::Metric => celsius,
            Self::Imperial => celsius_to_fahrenheit(celsius),
        }
    }

    /// Render a Celsius reading with one decimal and the unit symbol.
    pub fn format_fixed(self, celsius: f64) -> String {
        format!("{:.1}{}", self.convert(celsius), self.symbol())
    }

    /// Render a provider temperature string.
    ///
    /// Metric keeps the provider text verbatim; imperial converts and rounds
    /// to one decimal. Text that is not a number is passed through.
    pub fn format_raw(self, raw: &str) -> String {
        let raw = raw.trim();
        match (self, raw.parse::<f64>()) {
            (Self::Imperial, Ok(celsius)) => self.format_fixed(celsius),
            _ => format!("{}{}", raw, self.symbol()),
        }
    }
}

/// `F = C * 9 / 5 + 32`
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Options for one tool call, merged against the configured defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherOptions {
    pub units: Units,
    pub language: String,
    pub days: Option<u32>,
    pub hours: Option<u32>,
}

impl WeatherOptions {
    /// Merge caller-supplied units and language with the defaults.
    ///
    /// An empty language string counts as not supplied.
    pub fn merge(units: Option<Units>, language: Option<&str>, defaults: &WeatherDefaults) -> Self {
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&defaults.language)
            .to_string();

        Self {
            units: units.unwrap_or(defaults.units),
            language,
            days: None,
            hours: None,
        }
    }

    /// Set the forecast horizon, clamped to [`MAX_FORECAST_DAYS`].
    ///
    /// Fractions are truncated; anything below one day, or `None`, falls back
    /// to the configured default.
    pub fn with_days(mut self, days: Option<f64>, defaults: &WeatherDefaults) -> Self {
        let days = whole_count(days)
            .unwrap_or(defaults.forecast_days)
            .clamp(1, MAX_FORECAST_DAYS);
        self.days = Some(days);
        self
    }

    /// Set the hourly horizon, clamped to [`MAX_FORECAST_HOURS`].
    ///
    /// Fractions are truncated; anything below one hour, or `None`, means
    /// the full 24 hours.
    pub fn with_hours(mut self, hours: Option<f64>) -> Self {
        let hours = whole_count(hours)
            .unwrap_or(MAX_FORECAST_HOURS)
            .min(MAX_FORECAST_HOURS);
        self.hours = Some(hours);
        self
    }
}

/// A caller-supplied count as a positive whole number, saturating at `u32::MAX`.
fn whole_count(value: Option<f64>) -> Option<u32> {
    value
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v.trunc() as u32)
}

/// Forecast horizons offered by the provider's daily endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ForecastTier {
    ThreeDays,
    SevenDays,
    TenDays,
    FifteenDays,
    ThirtyDays,
}

impl ForecastTier {
    pub const ALL: [ForecastTier; 5] = [
        Self::ThreeDays,
        Self::SevenDays,
        Self::TenDays,
        Self::FifteenDays,
        Self::ThirtyDays,
    ];

    /// Smallest tier covering `days`. Requests above 30 get the 30-day tier.
    pub fn for_days(days: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| tier.days() >= days)
            .unwrap_or(Self::ThirtyDays)
    }

    pub fn days(self) -> u32 {
        match self {
            Self::ThreeDays => 3,
            Self::SevenDays => 7,
            Self::TenDays => 10,
            Self::FifteenDays => 15,
            Self::ThirtyDays => 30,
        }
    }

    /// Endpoint path segment, e.g. `7d`.
    pub fn endpoint(self) -> String {
        format!("{}d", self.days())
    }
}
