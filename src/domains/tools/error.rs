//! Tool-specific error types.
//!
//! Every weather tool reports failure through [`ToolError::Failed`], which
//! prefixes the underlying provider error with the operation that failed.

use std::fmt;

use thiserror::Error;

use crate::domains::weather::WeatherError;

/// The tool-level operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CurrentWeather,
    Forecast,
    HourlyForecast,
    CityLookup,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentWeather => "Weather fetch",
            Self::Forecast => "Forecast fetch",
            Self::HourlyForecast => "Hourly forecast fetch",
            Self::CityLookup => "City lookup",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The provider call behind a tool failed.
    #[error("{operation} failed: {source}")]
    Failed {
        operation: Operation,
        #[source]
        source: WeatherError,
    },
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Attribute a provider failure to `operation`.
    pub fn failed(operation: Operation, source: WeatherError) -> Self {
        Self::Failed { operation, source }
    }
}
