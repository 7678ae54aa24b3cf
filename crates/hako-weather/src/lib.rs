//! Weather forecasts for Hako.
//!
//! Fetches JMA forecast payloads, flattens them into per-area, per-date
//! records, and keeps a local SQLite history queryable by area and date.

pub mod areas;
pub mod error;
pub mod ingest;
pub mod payload;
pub mod provider;
pub mod store;
pub mod summary;
pub mod types;

pub use areas::{group_by_center, AreaDataset, AreaGroup, AreaGroups};
pub use error::WeatherError;
pub use ingest::{attribute_to, ingest};
pub use payload::{AreaRef, AreaSeries, ForecastReport, TimeSeries};
pub use provider::{parse_forecast_body, AreaOverrides, FetchedForecast, ForecastProvider};
pub use store::ForecastStore;
pub use summary::{summarize, AreaSummary, ReportSummary, TemperatureSummary, WindSummary, HOT_THRESHOLD};
pub use types::{Area, AreaKind, ForecastRecord};
