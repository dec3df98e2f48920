//! QWeather tools module.
//!
//! - `current`: current conditions (`getWeather`)
//! - `forecast`: 3 to 30 day forecast (`getWeatherForecast`)
//! - `hourly`: 24-hour forecast (`getHourlyWeather`)
//! - `lookup`: geocoding matches (`lookupCity`)
//!
//! All four share option merging, location resolution and error wording
//! through `common` and the weather domain.

pub mod common;
pub mod current;
pub mod forecast;
pub mod hourly;
pub mod lookup;

pub use current::{GetWeatherParams, GetWeatherTool};
pub use forecast::{GetForecastParams, GetForecastTool};
pub use hourly::{GetHourlyParams, GetHourlyTool};
pub use lookup::{LookupCityParams, LookupCityTool};
