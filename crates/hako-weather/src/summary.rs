//! Display-ready views of a fetched report and of stored history rows.

use chrono::{DateTime, FixedOffset};

use crate::ingest::parse_timestamp;
use crate::payload::{AreaSeries, ForecastReport};
use crate::types::ForecastRecord;

/// Highs above this many degrees Celsius are shown as hot.
pub const HOT_THRESHOLD: f64 = 25.0;

const PERIOD_FORMAT: &str = "%m/%d %H:%M";
const REPORT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub publishing_office: Option<String>,
    pub report_datetime: Option<DateTime<FixedOffset>>,
    pub areas: Vec<AreaSummary>,
}

impl ReportSummary {
    pub fn heading(&self) -> Option<String> {
        self.report_datetime
            .map(|t| format!("Reported: {}", t.format(REPORT_FORMAT)))
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// First-period overview of one area entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaSummary {
    pub area_name: String,
    pub period: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
    pub weather: Option<String>,
    pub temperature: Option<TemperatureSummary>,
    /// e.g. `"30%"`
    pub precipitation: Option<String>,
    pub wind: Option<WindSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSummary {
    pub high: Option<String>,
    pub low: Option<String>,
    pub is_hot: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindSummary {
    pub direction: Option<String>,
    pub level: Option<String>,
}

impl AreaSummary {
    pub fn title(&self) -> String {
        format!("{} forecast", self.area_name)
    }

    pub fn period_label(&self) -> Option<String> {
        self.period.map(|(start, end)| {
            format!(
                "{} - {}",
                start.format(PERIOD_FORMAT),
                end.format(PERIOD_FORMAT)
            )
        })
    }

    fn has_details(&self) -> bool {
        self.period.is_some()
            || self.weather.is_some()
            || self.temperature.is_some()
            || self.precipitation.is_some()
            || self.wind.is_some()
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(period) = self.period_label() {
            lines.push(format!("Period: {}", period));
        }
        if let Some(weather) = &self.weather {
            lines.push(format!("Weather: {}", weather));
        }
        if let Some(temp) = &self.temperature {
            let mut parts = Vec::new();
            if let Some(high) = &temp.high {
                parts.push(format!("High: {}°C", high));
            }
            if let Some(low) = &temp.low {
                parts.push(format!("Low: {}°C", low));
            }
            let suffix = if temp.is_hot { " (hot)" } else { "" };
            lines.push(format!("Temperature: {}{}", parts.join(" / "), suffix));
        }
        if let Some(pop) = &self.precipitation {
            lines.push(format!("Precipitation: {}", pop));
        }
        if let Some(wind) = &self.wind {
            lines.push(format!("Wind: {}", wind_text(&wind.direction, &wind.level)));
        }
        lines
    }
}

/// Summaries for every area entry of every time series, in payload order.
///
/// Entries with nothing to show are skipped. Timestamps that fail to parse
/// only drop the period line.
pub fn summarize(report: &ForecastReport) -> ReportSummary {
    let mut areas = Vec::new();

    for series in &report.time_series {
        let period = series_period(&series.time_defines);
        for entry in &series.areas {
            let summary = summarize_area(entry, period);
            if summary.has_details() {
                areas.push(summary);
            }
        }
    }

    ReportSummary {
        publishing_office: report.publishing_office.clone(),
        report_datetime: parse_timestamp(&report.report_datetime).ok(),
        areas,
    }
}

fn series_period(
    time_defines: &[String],
) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let times = time_defines
        .iter()
        .map(|t| parse_timestamp(t))
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    Some((*times.first()?, *times.last()?))
}

fn first(values: &Option<Vec<String>>) -> Option<String> {
    values
        .as_ref()?
        .first()
        .filter(|s| !s.trim().is_empty())
        .cloned()
}

fn summarize_area(
    entry: &AreaSeries,
    period: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
) -> AreaSummary {
    let temperature = entry.temps.as_ref().and_then(|temps| {
        let pick = |i: usize| temps.get(i).filter(|s| !s.trim().is_empty()).cloned();
        let high = pick(0);
        let low = pick(1);
        if high.is_none() && low.is_none() {
            return None;
        }
        let is_hot = high
            .as_deref()
            .and_then(|h| h.trim().parse::<f64>().ok())
            .is_some_and(|h| h > HOT_THRESHOLD);
        Some(TemperatureSummary { high, low, is_hot })
    });

    let direction = first(&entry.winds);
    let level = first(&entry.wind_levels);
    let wind = if direction.is_some() || level.is_some() {
        Some(WindSummary { direction, level })
    } else {
        None
    };

    AreaSummary {
        area_name: entry.area.name.clone(),
        period,
        weather: first(&entry.weathers),
        temperature,
        precipitation: first(&entry.pops).map(|p| format!("{}%", p)),
        wind,
    }
}

fn wind_text(direction: &Option<String>, level: &Option<String>) -> String {
    let mut parts = Vec::new();
    if let Some(direction) = direction {
        parts.push(format!("Direction: {}", direction));
    }
    if let Some(level) = level {
        parts.push(format!("Level: {}", level));
    }
    parts.join(" / ")
}

impl ForecastRecord {
    pub fn is_hot(&self) -> bool {
        self.temperature_high.is_some_and(|h| h > HOT_THRESHOLD)
    }

    /// History card text: only fields that are present, then the report time.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(weather) = &self.weather {
            lines.push(format!("Weather: {}", weather));
        }
        if self.temperature_high.is_some() || self.temperature_low.is_some() {
            let mut parts = Vec::new();
            if let Some(high) = self.temperature_high {
                parts.push(format!("High: {}°C", high));
            }
            if let Some(low) = self.temperature_low {
                parts.push(format!("Low: {}°C", low));
            }
            let suffix = if self.is_hot() { " (hot)" } else { "" };
            lines.push(format!("Temperature: {}{}", parts.join(" / "), suffix));
        }
        if let Some(pop) = self.precipitation_probability {
            lines.push(format!("Precipitation: {}%", pop));
        }
        if self.wind_direction.is_some() || self.wind_speed.is_some() {
            lines.push(format!(
                "Wind: {}",
                wind_text(&self.wind_direction, &self.wind_speed)
            ));
        }
        lines.push(format!(
            "Reported at {}",
            self.report_datetime.format("%H:%M")
        ));
        lines
    }
}
