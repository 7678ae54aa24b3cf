//! Forecast-specific error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Forecast payload is empty")]
    EmptyPayload,

    #[error("Unexpected payload shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid value: {0}")]
    Parse(String),

    #[error("Area dataset not found: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("Area dataset is malformed: {0}")]
    DatasetMalformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl WeatherError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) if e.is_timeout() => {
                "The forecast request timed out. Please try again.".to_string()
            }
            Self::Network(_) => "Failed to fetch the forecast. Check your connection.".to_string(),
            Self::Status { status, .. } => {
                format!("The forecast service answered with HTTP {}.", status)
            }
            Self::MalformedJson(_) => "Failed to read the forecast data (invalid JSON).".to_string(),
            Self::EmptyPayload => "The forecast service returned no data.".to_string(),
            Self::UnexpectedShape(_) => "The forecast data has an unexpected format.".to_string(),
            Self::Parse(msg) => format!("The forecast data contains an invalid value: {}", msg),
            Self::DatasetNotFound(path) => {
                format!("areas.json was not found\nPath: {}", path.display())
            }
            Self::DatasetMalformed(_) => "areas.json is not valid JSON.".to_string(),
            Self::Io(_) => "A file operation failed.".to_string(),
            Self::Store(_) => "Forecast history is unavailable.".to_string(),
        }
    }

    /// Connectivity or server-side failures, as opposed to bad data.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
