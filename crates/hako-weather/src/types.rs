use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Area tier in the JMA hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaKind {
    /// Regional center, the parent grouping
    Center,
    /// Local forecast office
    Office,
}

impl AreaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Office => "office",
        }
    }
}

impl FromStr for AreaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Self::Center),
            "office" => Ok(Self::Office),
            other => Err(format!("unknown area kind: {}", other)),
        }
    }
}

/// A center or office from the area dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub code: String,
    pub name: String,
    pub parent_code: Option<String>,
    pub kind: AreaKind,
}

impl Area {
    pub fn center(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            parent_code: None,
            kind: AreaKind::Center,
        }
    }

    pub fn office(code: &str, name: &str, parent_code: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            parent_code: parent_code.map(str::to_string),
            kind: AreaKind::Office,
        }
    }
}

/// One area / forecast time / report time tuple.
///
/// Absent source values stay `None`; they are never stored as zero or "".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub area_code: String,
    pub area_name: String,
    pub forecast_date: DateTime<FixedOffset>,
    pub report_datetime: DateTime<FixedOffset>,
    pub weather: Option<String>,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
    /// 0..=100
    pub precipitation_probability: Option<u8>,
    pub wind_direction: Option<String>,
    pub wind_speed: Option<String>,
}

impl ForecastRecord {
    /// Uniqueness key: a later record with the same key replaces this one.
    pub fn key(&self) -> (&str, DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (&self.area_code, self.forecast_date, self.report_datetime)
    }

    /// Calendar date of the forecast in its own UTC offset.
    pub fn forecast_day(&self) -> NaiveDate {
        self.forecast_date.date_naive()
    }
}
