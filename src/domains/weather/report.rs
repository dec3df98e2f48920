//! Plain-text report building shared by every weather tool.
//!
//! Reports are assembled from a handful of reusable pieces: headings,
//! `- Label: value` items, [`Metric`] descriptors that know their own label
//! and unit suffix, a [`Wind`] triplet with three layouts, and the provider
//! attribution footer.

use std::fmt;

use super::models::Refer;

/// A text report under construction.
#[derive(Debug, Default, Clone)]
pub struct Report {
    text: String,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a report with `"{title}:"` followed by a blank line.
    pub fn titled(title: impl fmt::Display) -> Self {
        let mut report = Self::new();
        report.line(format_args!("{title}:")).blank();
        report
    }

    pub fn line(&mut self, line: impl fmt::Display) -> &mut Self {
        self.text.push_str(&line.to_string());
        self.text.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.text.push('\n');
        self
    }

    /// Blank line, then `"{heading}:"`.
    pub fn section(&mut self, heading: &str) -> &mut Self {
        self.blank().line(format_args!("{heading}:"))
    }

    /// `- {label}: {value}`
    pub fn item(&mut self, label: &str, value: impl fmt::Display) -> &mut Self {
        self.line(format_args!("- {label}: {value}"))
    }

    pub fn metric(&mut self, metric: Metric<'_>) -> &mut Self {
        self.item(metric.label(), &metric)
    }

    /// Render the metric only when there is one.
    pub fn metric_opt(&mut self, metric: Option<Metric<'_>>) -> &mut Self {
        if let Some(metric) = metric {
            self.metric(metric);
        }
        self
    }

    pub fn wind(&mut self, wind: &Wind<'_>, layout: WindLayout) -> &mut Self {
        match layout {
            WindLayout::Expanded => self
                .item("Direction", wind.bearing())
                .item("Scale", wind.scale)
                .item("Speed", wind.speed()),
            WindLayout::Paired => self.item("Wind", wind.bearing()).item(
                "Wind Scale",
                format_args!("{}, Speed: {}", wind.scale, wind.speed()),
            ),
            WindLayout::Inline => self.item(
                "Wind",
                format_args!(
                    "{}, Scale: {}, Speed: {}",
                    wind.bearing(),
                    wind.scale,
                    wind.speed()
                ),
            ),
        }
    }

    /// Append `Data Sources` / `License` lines after one blank line.
    ///
    /// Nothing is written when the provider sent no attribution.
    pub fn attribution(&mut self, refer: Option<&Refer>) -> &mut Self {
        let Some(refer) = refer else {
            return self;
        };
        let sources = joined(&refer.sources);
        let license = joined(&refer.license);
        if sources.is_none() && license.is_none() {
            return self;
        }

        self.ensure_blank();
        if let Some(sources) = sources {
            self.line(format_args!("Data Sources: {sources}"));
        }
        if let Some(license) = license {
            self.line(format_args!("License: {license}"));
        }
        self
    }

    /// Append another report's text as is.
    pub fn append(&mut self, other: &Report) -> &mut Self {
        self.text.push_str(&other.text);
        self
    }

    /// Make sure the text ends with an empty line.
    pub fn ensure_blank(&mut self) -> &mut Self {
        if !self.text.is_empty() && !self.text.ends_with("\n\n") {
            if !self.text.ends_with('\n') {
                self.text.push('\n');
            }
            self.text.push('\n');
        }
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn finish(self) -> String {
        self.text
    }
}

fn joined(values: &Option<Vec<String>>) -> Option<String> {
    values
        .as_ref()
        .filter(|v| !v.is_empty())
        .map(|v| v.join(", "))
}

/// Weather conditions with the provider icon code.
#[derive(Debug, Clone, Copy)]
pub struct Conditions<'a> {
    pub text: &'a str,
    pub icon: &'a str,
}

impl fmt::Display for Conditions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Icon: {})", self.text, self.icon)
    }
}

/// Wind direction, bearing, Beaufort scale and speed.
#[derive(Debug, Clone, Copy)]
pub struct Wind<'a> {
    pub direction: &'a str,
    pub degrees: &'a str,
    pub scale: &'a str,
    pub speed: &'a str,
}

impl Wind<'_> {
    fn bearing(&self) -> String {
        format!("{} ({}°)", self.direction, self.degrees)
    }

    fn speed(&self) -> String {
        format!("{} km/h", self.speed)
    }
}

/// How a [`Wind`] triplet is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindLayout {
    /// One item each for direction, scale and speed.
    Expanded,
    /// `Wind` then `Wind Scale, Speed`.
    Paired,
    /// Everything on a single `Wind` item.
    Inline,
}

/// A labelled measurement with its unit suffix.
#[derive(Debug, Clone)]
pub enum Metric<'a> {
    Humidity(&'a str),
    PrecipitationProbability(&'a str),
    Precipitation(&'a str),
    Pressure(&'a str),
    Visibility(&'a str),
    CloudCover(&'a str),
    UvIndex(&'a str),
    /// Already converted and carrying its unit symbol.
    DewPoint(String),
}

impl Metric<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Humidity(_) => "Humidity",
            Self::PrecipitationProbability(_) => "Precipitation Probability",
            Self::Precipitation(_) => "Precipitation",
            Self::Pressure(_) => "Pressure",
            Self::Visibility(_) => "Visibility",
            Self::CloudCover(_) => "Cloud Cover",
            Self::UvIndex(_) => "UV Index",
            Self::DewPoint(_) => "Dew Point",
        }
    }
}

impl fmt::Display for Metric<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Humidity(v) | Self::PrecipitationProbability(v) | Self::CloudCover(v) => {
                write!(f, "{v}%")
            }
            Self::Precipitation(v) => write!(f, "{v} mm"),
            Self::Pressure(v) => write!(f, "{v} hPa"),
            Self::Visibility(v) => write!(f, "{v} km"),
            Self::UvIndex(v) => write!(f, "{v}"),
            Self::DewPoint(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIND: Wind<'static> = Wind {
        direction: "NE",
        degrees: "45",
        scale: "3-4",
        speed: "16",
    };

    #[test]
    fn test_titled_report() {
        let report = Report::titled("Weather for Beijing");
        assert_eq!(report.as_str(), "Weather for Beijing:\n\n");
    }

    #[test]
    fn test_wind_layouts() {
        let mut expanded = Report::new();
        expanded.wind(&WIND, WindLayout::Expanded);
        assert_eq!(
            expanded.finish(),
            "- Direction: NE (45°)\n- Scale: 3-4\n- Speed: 16 km/h\n"
        );

        let mut paired = Report::new();
        paired.wind(&WIND, WindLayout::Paired);
        assert_eq!(
            paired.finish(),
            "- Wind: NE (45°)\n- Wind Scale: 3-4, Speed: 16 km/h\n"
        );

        let mut inline = Report::new();
        inline.wind(&WIND, WindLayout::Inline);
        assert_eq!(
            inline.finish(),
            "- Wind: NE (45°), Scale: 3-4, Speed: 16 km/h\n"
        );
    }

    #[test]
    fn test_metric_suffixes() {
        let mut report = Report::new();
        report
            .metric(Metric::Humidity("40"))
            .metric(Metric::Precipitation("0.0"))
            .metric(Metric::Pressure("1020"))
            .metric(Metric::Visibility("25"))
            .metric_opt(None)
            .metric(Metric::UvIndex("3"));
        assert_eq!(
            report.finish(),
            "- Humidity: 40%\n- Precipitation: 0.0 mm\n- Pressure: 1020 hPa\n- Visibility: 25 km\n- UV Index: 3\n"
        );
    }

    #[test]
    fn test_attribution_single_blank_line() {
        let refer = Refer {
            sources: Some(vec!["QWeather".into(), "CMA".into()]),
            license: Some(vec!["QWeather Developers License".into()]),
        };

        let mut report = Report::new();
        report.line("Updated: now").blank().attribution(Some(&refer));
        assert_eq!(
            report.finish(),
            "Updated: now\n\nData Sources: QWeather, CMA\nLicense: QWeather Developers License\n"
        );
    }

    #[test]
    fn test_attribution_skipped_when_absent() {
        let mut report = Report::new();
        report
            .line("x")
            .attribution(None)
            .attribution(Some(&Refer::default()));
        assert_eq!(report.finish(), "x\n");
    }

    #[test]
    fn test_conditions_display() {
        let c = Conditions {
            text: "Sunny",
            icon: "100",
        };
        assert_eq!(c.to_string(), "Sunny (Icon: 100)");
    }
}
