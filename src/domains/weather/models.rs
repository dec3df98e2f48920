//! QWeather response payloads.
//!
//! The provider sends every scalar as a string, so fields stay `String` and
//! are parsed only where a report needs a number. Payload fields default to
//! empty so that error envelopes (which carry only `code`) still decode.

use serde::Deserialize;

/// Success value of the provider `code` field.
pub const SUCCESS_CODE: &str = "200";

/// Attribution block attached to most responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Refer {
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub license: Option<Vec<String>>,
}

/// Common envelope accessors used by the client's status check.
pub trait ProviderEnvelope {
    /// The provider status code (`"200"` on success).
    fn code(&self) -> &str;

    fn is_success(&self) -> bool {
        self.code() == SUCCESS_CODE
    }
}

// ============================================================================
// Current weather
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowResponse {
    pub code: String,
    #[serde(default)]
    pub update_time: String,
    #[serde(default)]
    pub now: Option<NowData>,
    #[serde(default)]
    pub refer: Option<Refer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NowData {
    pub obs_time: String,
    pub temp: String,
    pub feels_like: String,
    pub icon: String,
    pub text: String,
    pub wind360: String,
    pub wind_dir: String,
    pub wind_scale: String,
    pub wind_speed: String,
    pub humidity: String,
    pub precip: String,
    pub pressure: String,
    pub vis: String,
    pub cloud: Option<String>,
    pub dew: Option<String>,
}

// ============================================================================
// Daily forecast
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    pub code: String,
    #[serde(default)]
    pub update_time: String,
    #[serde(default)]
    pub daily: Vec<DailyData>,
    #[serde(default)]
    pub refer: Option<Refer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyData {
    pub fx_date: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub moonrise: Option<String>,
    pub moonset: Option<String>,
    pub moon_phase: Option<String>,
    pub moon_phase_icon: Option<String>,
    pub temp_max: String,
    pub temp_min: String,
    pub icon_day: String,
    pub text_day: String,
    pub icon_night: String,
    pub text_night: String,
    pub wind360_day: String,
    pub wind_dir_day: String,
    pub wind_scale_day: String,
    pub wind_speed_day: String,
    pub wind360_night: String,
    pub wind_dir_night: String,
    pub wind_scale_night: String,
    pub wind_speed_night: String,
    pub humidity: String,
    pub precip: String,
    pub pressure: String,
    pub vis: String,
    pub cloud: Option<String>,
    pub uv_index: Option<String>,
}

// ============================================================================
// Hourly forecast
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyResponse {
    pub code: String,
    #[serde(default)]
    pub update_time: String,
    #[serde(default)]
    pub hourly: Vec<HourlyData>,
    #[serde(default)]
    pub refer: Option<Refer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HourlyData {
    pub fx_time: String,
    pub temp: String,
    pub icon: String,
    pub text: String,
    pub wind360: String,
    pub wind_dir: String,
    pub wind_scale: String,
    pub wind_speed: String,
    pub humidity: String,
    pub pop: Option<String>,
    pub precip: String,
    pub pressure: String,
    pub cloud: Option<String>,
    pub dew: Option<String>,
}

// ============================================================================
// Geocoding
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CityLookupResponse {
    pub code: String,
    #[serde(default)]
    pub location: Vec<CityInfo>,
    #[serde(default)]
    pub refer: Option<Refer>,
}

/// A single geocoding match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CityInfo {
    pub name: String,
    pub id: String,
    pub lat: String,
    pub lon: String,
    pub adm2: String,
    pub adm1: String,
    pub country: String,
    pub tz: String,
    pub utc_offset: String,
    pub is_dst: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rank: String,
    pub fx_link: String,
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ProviderEnvelope for $ty {
                fn code(&self) -> &str {
                    &self.code
                }
            }
        )*
    };
}

impl_envelope!(NowResponse, DailyResponse, HourlyResponse, CityLookupResponse);

/// Treat an empty provider string the same as a missing one.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_decodes_without_payload() {
        let resp: NowResponse = serde_json::from_str(r#"{"code": "401"}"#).unwrap();
        assert!(!resp.is_success());
        assert!(resp.now.is_none());
    }

    #[test]
    fn test_city_info_type_field() {
        let json = r#"{"code":"200","location":[{"name":"Beijing","id":"101010100","type":"city","utcOffset":"+08:00"}]}"#;
        let resp: CityLookupResponse = serde_json::from_str(json).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.location[0].kind, "city");
        assert_eq!(resp.location[0].utc_offset, "+08:00");
    }

    #[test]
    fn test_daily_camel_case_fields() {
        let json = r#"{"fxDate":"2021-11-15","tempMax":"12","wind360Day":"45","uvIndex":"3"}"#;
        let day: DailyData = serde_json::from_str(json).unwrap();
        assert_eq!(day.fx_date, "2021-11-15");
        assert_eq!(day.temp_max, "12");
        assert_eq!(day.wind360_day, "45");
        assert_eq!(day.uv_index.as_deref(), Some("3"));
    }

    #[test]
    fn test_present_filters_empty() {
        assert_eq!(present(&Some("10".into())), Some("10"));
        assert_eq!(present(&Some("".into())), None);
        assert_eq!(present(&None), None);
    }
}
