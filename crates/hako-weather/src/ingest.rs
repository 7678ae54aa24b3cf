//! Flattening of a forecast report into [`ForecastRecord`]s.

use chrono::{DateTime, FixedOffset};

use crate::error::{Result, WeatherError};
use crate::payload::{AreaSeries, ForecastReport};
use crate::types::ForecastRecord;

/// One record per (time series, area entry, time define).
///
/// `temps` interleaves high/low, so the low for index `i` is read from
/// `temps[i + 1]`. Missing indices and empty strings become `None`.
pub fn ingest(report: &ForecastReport) -> Result<Vec<ForecastRecord>> {
    let report_datetime = parse_timestamp(&report.report_datetime)?;
    let mut records = Vec::new();

    for series in &report.time_series {
        let times = series
            .time_defines
            .iter()
            .map(|t| parse_timestamp(t))
            .collect::<Result<Vec<_>>>()?;

        for entry in &series.areas {
            for (i, forecast_date) in times.iter().enumerate() {
                records.push(record_at(entry, i, *forecast_date, report_datetime)?);
            }
        }
    }

    tracing::debug!(
        "Ingested {} records from {} time series",
        records.len(),
        report.time_series.len()
    );
    Ok(records)
}

/// Re-attribute records to the area code the caller asked for.
pub fn attribute_to(records: &mut [ForecastRecord], area_code: &str) {
    for record in records {
        record.area_code = area_code.to_string();
    }
}

fn record_at(
    entry: &AreaSeries,
    i: usize,
    forecast_date: DateTime<FixedOffset>,
    report_datetime: DateTime<FixedOffset>,
) -> Result<ForecastRecord> {
    let temps = entry.temps.as_deref();
    Ok(ForecastRecord {
        area_code: entry.area.code.clone(),
        area_name: entry.area.name.clone(),
        forecast_date,
        report_datetime,
        weather: text_at(entry.weathers.as_deref(), i),
        temperature_high: number_at(temps, i)?,
        temperature_low: number_at(temps, i + 1)?,
        precipitation_probability: percent_at(entry.pops.as_deref(), i)?,
        wind_direction: text_at(entry.winds.as_deref(), i),
        wind_speed: text_at(entry.wind_levels.as_deref(), i),
    })
}

fn present(values: Option<&[String]>, i: usize) -> Option<&str> {
    values?
        .get(i)
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn text_at(values: Option<&[String]>, i: usize) -> Option<String> {
    present(values, i).map(str::to_string)
}

fn number_at(values: Option<&[String]>, i: usize) -> Result<Option<f64>> {
    present(values, i)
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| WeatherError::Parse(format!("temperature {:?}", s)))
        })
        .transpose()
}

fn percent_at(values: Option<&[String]>, i: usize) -> Result<Option<u8>> {
    present(values, i)
        .map(|s| {
            s.trim()
                .parse::<u8>()
                .ok()
                .filter(|p| *p <= 100)
                .ok_or_else(|| WeatherError::Parse(format!("precipitation probability {:?}", s)))
        })
        .transpose()
}

pub(crate) fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .map_err(|e| WeatherError::Parse(format!("timestamp {:?}: {}", text, e)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn report(value: serde_json::Value) -> ForecastReport {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_temps_interleave_high_low() {
        let report = report(serde_json::json!({
            "reportDatetime": "2024-07-01T11:00:00+09:00",
            "timeSeries": [{
                "timeDefines": ["2024-07-01T00:00:00+09:00", "2024-07-02T00:00:00+09:00"],
                "areas": [{"area": {"name": "Tokyo", "code": "44132"}, "temps": ["28", "19"]}]
            }]
        }));

        let records = ingest(&report).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].temperature_high, Some(28.0));
        assert_eq!(records[0].temperature_low, Some(19.0));
        assert_eq!(records[1].temperature_high, Some(19.0));
        assert_eq!(records[1].temperature_low, None);
    }

    #[test]
    fn test_missing_and_empty_values_are_absent() {
        let report = report(serde_json::json!({
            "reportDatetime": "2024-07-01T11:00:00+09:00",
            "timeSeries": [{
                "timeDefines": [
                    "2024-07-01T11:00:00+09:00",
                    "2024-07-02T00:00:00+09:00",
                    "2024-07-03T00:00:00+09:00"
                ],
                "areas": [{
                    "area": {"name": "Tokyo", "code": "130010"},
                    "weathers": ["Sunny", ""],
                    "pops": ["", "30", "0"],
                    "winds": ["North wind"]
                }]
            }]
        }));

        let records = ingest(&report).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].weather.as_deref(), Some("Sunny"));
        assert_eq!(records[1].weather, None);
        assert_eq!(records[2].weather, None);

        assert_eq!(records[0].precipitation_probability, None);
        assert_eq!(records[1].precipitation_probability, Some(30));
        assert_eq!(records[2].precipitation_probability, Some(0));

        assert_eq!(records[0].wind_direction.as_deref(), Some("North wind"));
        assert_eq!(records[1].wind_direction, None);
        assert!(records.iter().all(|r| r.temperature_high.is_none()));
        assert!(records.iter().all(|r| r.wind_speed.is_none()));
    }

    #[test]
    fn test_each_area_and_series_flattened() {
        let report = report(serde_json::json!({
            "reportDatetime": "2024-07-01T11:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": ["2024-07-01T11:00:00+09:00"],
                    "areas": [
                        {"area": {"name": "East", "code": "1"}, "weathers": ["Rain"]},
                        {"area": {"name": "West", "code": "2"}, "weathers": ["Snow"]}
                    ]
                },
                {
                    "timeDefines": ["2024-07-01T12:00:00+09:00", "2024-07-01T18:00:00+09:00"],
                    "areas": [{"area": {"name": "East", "code": "1"}, "pops": ["10", "20"]}]
                }
            ]
        }));

        let records = ingest(&report).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].area_name, "West");
        assert_eq!(records[3].precipitation_probability, Some(20));
        assert!(records
            .iter()
            .all(|r| r.report_datetime.to_rfc3339() == "2024-07-01T11:00:00+09:00"));
    }

    #[test]
    fn test_invalid_values_are_parse_errors() {
        let bad_temp = report(serde_json::json!({
            "reportDatetime": "2024-07-01T11:00:00+09:00",
            "timeSeries": [{
                "timeDefines": ["2024-07-01T11:00:00+09:00"],
                "areas": [{"area": {"name": "A", "code": "1"}, "temps": ["hot"]}]
            }]
        }));
        assert!(matches!(ingest(&bad_temp), Err(WeatherError::Parse(_))));

        let bad_pop = report(serde_json::json!({
            "reportDatetime": "2024-07-01T11:00:00+09:00",
            "timeSeries": [{
                "timeDefines": ["2024-07-01T11:00:00+09:00"],
                "areas": [{"area": {"name": "A", "code": "1"}, "pops": ["140"]}]
            }]
        }));
        assert!(matches!(ingest(&bad_pop), Err(WeatherError::Parse(_))));

        let bad_time = report(serde_json::json!({
            "reportDatetime": "yesterday",
            "timeSeries": []
        }));
        assert!(matches!(ingest(&bad_time), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_utc_suffix_accepted() {
        let report = report(serde_json::json!({
            "reportDatetime": "2024-07-01T02:00:00Z",
            "timeSeries": [{
                "timeDefines": ["2024-07-01T03:00:00Z"],
                "areas": [{"area": {"name": "A", "code": "1"}}]
            }]
        }));
        let records = ingest(&report).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weather, None);
    }

    #[test]
    fn test_attribute_to_requested_code() {
        let report = report(serde_json::json!({
            "reportDatetime": "2024-07-01T11:00:00+09:00",
            "timeSeries": [{
                "timeDefines": ["2024-07-01T11:00:00+09:00"],
                "areas": [{"area": {"name": "Tokachi", "code": "014100"}, "weathers": ["Fog"]}]
            }]
        }));
        let mut records = ingest(&report).unwrap();
        attribute_to(&mut records, "014030");
        assert_eq!(records[0].area_code, "014030");
        assert_eq!(records[0].area_name, "Tokachi");
    }
}
