//! HTTP provider for the JMA forecast endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::error::{Result, WeatherError};
use crate::ingest::{attribute_to, ingest};
use crate::payload::ForecastReport;
use crate::types::ForecastRecord;

/// Area codes that have no forecast of their own and are served from
/// another office's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaOverrides {
    map: BTreeMap<String, String>,
}

impl Default for AreaOverrides {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        // Tokachi is published under Kushiro
        map.insert("014030".to_string(), "014100".to_string());
        Self { map }
    }
}

impl From<BTreeMap<String, String>> for AreaOverrides {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }
}

impl AreaOverrides {
    pub fn none() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Code to fetch for a requested area.
    pub fn resolve<'a>(&'a self, area_code: &'a str) -> &'a str {
        self.map
            .get(area_code)
            .map(String::as_str)
            .unwrap_or(area_code)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Result of one fetch.
#[derive(Debug, Clone)]
pub struct FetchedForecast {
    /// Area the caller asked for; every record carries this code.
    pub requested_code: String,
    /// Area whose payload was actually downloaded.
    pub fetched_code: String,
    pub report: ForecastReport,
    pub records: Vec<ForecastRecord>,
}

impl FetchedForecast {
    pub fn was_remapped(&self) -> bool {
        self.requested_code != self.fetched_code
    }
}

#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    base_url: String,
    overrides: AreaOverrides,
}

impl ForecastProvider {
    pub fn new(base_url: &str, timeout: Duration, overrides: AreaOverrides) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            overrides,
        })
    }

    pub fn forecast_url(&self, area_code: &str) -> String {
        format!("{}/{}.json", self.base_url, area_code)
    }

    pub fn overrides(&self) -> &AreaOverrides {
        &self.overrides
    }

    /// Fetch and flatten the forecast for an area.
    ///
    /// One request, no retries. Every record is re-attributed to `area_code`,
    /// so entries from different series or sub-areas that share a time
    /// define end up with the same store key. When stored, the last of them
    /// replaces the others: a temperature entry for tomorrow 00:00 drops the
    /// weather text recorded for that time.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, area_code: &str) -> Result<FetchedForecast> {
        let fetched_code = self.overrides.resolve(area_code).to_string();
        if fetched_code != area_code {
            tracing::debug!("Area {} is served from {}", area_code, fetched_code);
        }
        let url = self.forecast_url(&fetched_code);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Forecast request to {} failed with {}", url, status);
            return Err(WeatherError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let report = parse_forecast_body(&body)?;
        let mut records = ingest(&report)?;
        attribute_to(&mut records, area_code);

        tracing::info!(
            "Fetched forecast for {}: {} records",
            area_code,
            records.len()
        );

        Ok(FetchedForecast {
            requested_code: area_code.to_string(),
            fetched_code,
            report,
            records,
        })
    }
}

/// Decode a forecast response body and take its first report.
pub fn parse_forecast_body(body: &str) -> Result<ForecastReport> {
    let value: Value = serde_json::from_str(body).map_err(WeatherError::MalformedJson)?;

    let first = match value {
        Value::Null => return Err(WeatherError::EmptyPayload),
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or(WeatherError::EmptyPayload)?,
        other => {
            return Err(WeatherError::UnexpectedShape(format!(
                "expected an array of reports, got {}",
                json_kind(&other)
            )))
        }
    };

    serde_json::from_value(first).map_err(|e| WeatherError::UnexpectedShape(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
