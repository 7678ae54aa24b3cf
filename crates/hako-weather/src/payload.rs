//! JMA forecast payload as served by `/bosai/forecast/data/forecast/{code}.json`.
//!
//! The endpoint returns an array of reports; the first one carries the
//! short-range forecast. Parallel arrays in each area entry are indexed by
//! position against `timeDefines`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    #[serde(default)]
    pub publishing_office: Option<String>,
    pub report_datetime: String,
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub time_defines: Vec<String>,
    pub areas: Vec<AreaSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSeries {
    pub area: AreaRef,
    #[serde(default)]
    pub weathers: Option<Vec<String>>,
    #[serde(default)]
    pub temps: Option<Vec<String>>,
    #[serde(default)]
    pub pops: Option<Vec<String>>,
    #[serde(default)]
    pub winds: Option<Vec<String>>,
    #[serde(default)]
    pub wind_levels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaRef {
    pub name: String,
    pub code: String,
}
