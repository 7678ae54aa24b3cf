//! Forecast viewer backend: area list, current forecast and history.
//!
//! Fetches go through [`FetchState`] tickets so a response for an area the
//! user has already navigated away from is neither shown nor stored.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use hako_core::{AppError, FetchState, FetchTicket, WeatherConfig};
use hako_weather::{
    group_by_center, summarize, AreaDataset, AreaGroups, AreaOverrides, FetchedForecast,
    ForecastProvider, ForecastRecord, ForecastStore, ReportSummary, WeatherError,
};

use crate::error_mapping::IntoAppError;

pub struct ForecastService {
    store: ForecastStore,
    provider: ForecastProvider,
    areas_path: PathBuf,
    groups: AreaGroups,
    fetch_state: FetchState,
    current: Option<FetchedForecast>,
    last_error: Option<String>,
}

impl ForecastService {
    pub fn new(store: ForecastStore, provider: ForecastProvider, areas_path: &Path) -> Self {
        Self {
            store,
            provider,
            areas_path: areas_path.to_path_buf(),
            groups: AreaGroups::default(),
            fetch_state: FetchState::new(),
            current: None,
            last_error: None,
        }
    }

    /// Open the store and build the provider from config.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, AppError> {
        if let Some(dir) = config.database_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let store =
            ForecastStore::open(&config.database_path).map_err(IntoAppError::into_app_error)?;
        let provider = ForecastProvider::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            AreaOverrides::from(config.area_overrides.clone()),
        )
        .map_err(IntoAppError::into_app_error)?;

        Ok(Self::new(store, provider, &config.areas_path))
    }

    /// Read the area dataset, persist it and rebuild the center groups.
    pub fn load_areas(&mut self) -> Result<&AreaGroups, AppError> {
        let loaded = AreaDataset::from_path(&self.areas_path).and_then(|dataset| {
            self.store.load_areas(&dataset)?;
            Ok(dataset)
        });

        match loaded {
            Ok(dataset) => {
                self.groups = group_by_center(&dataset.to_vec());
                tracing::info!("Area list ready: {} centers", self.groups.len());
                Ok(&self.groups)
            }
            Err(e) => Err(self.record_error(e)),
        }
    }

    pub fn groups(&self) -> &AreaGroups {
        &self.groups
    }

    /// Start a fetch for `area_code`, superseding any outstanding one.
    pub fn begin_fetch(&mut self, area_code: &str) -> FetchTicket {
        self.fetch_state.begin(area_code)
    }

    /// Apply a fetch result.
    ///
    /// Returns `Ok(false)` for a superseded ticket, which is dropped without
    /// touching the display or the store. On failure the previous forecast
    /// stays in place and `last_error` carries the message.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<FetchedForecast, WeatherError>,
    ) -> Result<bool, AppError> {
        if !self.fetch_state.finish(ticket) {
            tracing::debug!("Dropping stale forecast for {}", ticket.area_code());
            return Ok(false);
        }

        let fetched = result.map_err(|e| self.record_error(e))?;
        self.last_error = None;
        let stored = self.store.upsert(&fetched.records);
        self.current = Some(fetched);
        stored.map_err(|e| self.record_error(e))?;
        Ok(true)
    }

    /// Fetch, show and store the forecast for one area.
    pub async fn refresh(&mut self, area_code: &str) -> Result<bool, AppError> {
        let ticket = self.begin_fetch(area_code);
        let provider = self.provider.clone();
        let result = provider.fetch(area_code).await;
        self.complete_fetch(&ticket, result)
    }

    /// Stored records for an area on a given forecast day, newest report first.
    pub fn history(&self, area_code: &str, date: NaiveDate) -> Result<Vec<ForecastRecord>, AppError> {
        self.store
            .query(area_code, date)
            .map_err(IntoAppError::into_app_error)
    }

    pub fn current(&self) -> Option<&FetchedForecast> {
        self.current.as_ref()
    }

    pub fn summary(&self) -> Option<ReportSummary> {
        self.current.as_ref().map(|f| summarize(&f.report))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.fetch_state.is_busy()
    }

    pub fn provider(&self) -> &ForecastProvider {
        &self.provider
    }

    pub fn store(&self) -> &ForecastStore {
        &self.store
    }

    fn record_error(&mut self, e: WeatherError) -> AppError {
        tracing::warn!("Forecast error: {}", e);
        self.last_error = Some(e.user_message());
        e.into_app_error()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn service(areas_path: &Path) -> ForecastService {
        let provider = ForecastProvider::new(
            "http://127.0.0.1:9",
            Duration::from_secs(1),
            AreaOverrides::default(),
        )
        .unwrap();
        ForecastService::new(ForecastStore::in_memory().unwrap(), provider, areas_path)
    }

    fn fetched(area_code: &str, weather: &str) -> FetchedForecast {
        let report = hako_weather::parse_forecast_body(
            &serde_json::json!([{
                "reportDatetime": "2024-07-01T11:00:00+09:00",
                "timeSeries": [{
                    "timeDefines": ["2024-07-01T11:00:00+09:00"],
                    "areas": [{"area": {"name": "Tokyo", "code": "130010"}, "weathers": [weather]}]
                }]
            }])
            .to_string(),
        )
        .unwrap();
        let mut records = hako_weather::ingest(&report).unwrap();
        hako_weather::attribute_to(&mut records, area_code);
        FetchedForecast {
            requested_code: area_code.to_string(),
            fetched_code: area_code.to_string(),
            report,
            records,
        }
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut service = service(Path::new("/nonexistent/areas.json"));

        let first = service.begin_fetch("130000");
        let second = service.begin_fetch("140000");

        assert!(!service
            .complete_fetch(&first, Ok(fetched("130000", "Sunny")))
            .unwrap());
        assert!(service.current().is_none());
        assert_eq!(service.store().forecast_count().unwrap(), 0);
        assert!(service.is_busy());

        assert!(service
            .complete_fetch(&second, Ok(fetched("140000", "Rain")))
            .unwrap());
        assert!(!service.is_busy());
        assert_eq!(service.current().unwrap().requested_code, "140000");
        assert_eq!(service.store().forecast_count().unwrap(), 1);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_forecast() {
        let mut service = service(Path::new("/nonexistent/areas.json"));

        let ticket = service.begin_fetch("130000");
        service
            .complete_fetch(&ticket, Ok(fetched("130000", "Sunny")))
            .unwrap();

        let ticket = service.begin_fetch("130000");
        let err = service
            .complete_fetch(&ticket, Err(WeatherError::EmptyPayload))
            .unwrap_err();

        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(
            service.last_error(),
            Some("The forecast service returned no data.")
        );
        let summary = service.summary().unwrap();
        assert_eq!(summary.areas[0].weather.as_deref(), Some("Sunny"));
        assert!(!service.is_busy());
    }

    #[test]
    fn test_missing_area_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("areas.json");
        let mut service = service(&path);

        let err = service.load_areas().unwrap_err();
        assert!(matches!(err, AppError::Resource(_)));
        assert!(service.last_error().unwrap().contains("areas.json"));
        assert!(service.groups().is_empty());
    }

    #[test]
    fn test_history_by_day() {
        let mut service = service(Path::new("/nonexistent/areas.json"));
        let ticket = service.begin_fetch("130000");
        service
            .complete_fetch(&ticket, Ok(fetched("130000", "Sunny")))
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let records = service.history("130000", day).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weather.as_deref(), Some("Sunny"));
        assert!(service
            .history("130000", day.succ_opt().unwrap())
            .unwrap()
            .is_empty());
    }
}
