//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod qweather;

pub use qweather::{
    GetForecastParams, GetForecastTool, GetHourlyParams, GetHourlyTool, GetWeatherParams,
    GetWeatherTool, LookupCityParams, LookupCityTool,
};
