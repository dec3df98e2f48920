//! Weather domain module.
//!
//! Everything the tools need to talk to QWeather and turn its payloads into
//! text:
//!
//! - `client.rs` - async HTTP client for the weather and geocoding APIs
//! - `resolver.rs` - location text to provider location ID
//! - `options.rs` - per-call option merging, unit conversion, forecast tiers
//! - `report.rs` - plain-text report builder
//! - `models.rs` - provider response payloads
//! - `error.rs` - provider error classification

pub mod client;
mod error;
pub mod models;
pub mod options;
pub mod report;
pub mod resolver;

pub use client::{CityLookup, QWeatherClient};
pub use error::WeatherError;
pub use options::{ForecastTier, Units, WeatherOptions};
pub use report::Report;
pub use resolver::LocationResolver;
