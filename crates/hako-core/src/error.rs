//! Centralized error types for Hako.
//!
//! Crate-level errors (calculator, forecast) are mapped into [`AppError`] at
//! the application layer so every failure can be shown with `user_message()`
//! while keeping the full error for logging.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Input(e) => e.user_message(),
            AppError::Arithmetic(e) => e.user_message(),
            AppError::Network(e) => e.user_message(),
            AppError::Parse(e) => e.user_message(),
            AppError::Resource(e) => e.user_message(),
            AppError::Database(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Non-numeric or out-of-domain operands.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Not a number: {0}")]
    NotANumber(String),

    #[error("Out of domain: {0}")]
    OutOfDomain(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

impl InputError {
    pub fn user_message(&self) -> &'static str {
        match self {
            InputError::NotANumber(_) => "That is not a valid number.",
            InputError::OutOfDomain(_) => "That operation is not defined for this value.",
            InputError::UnknownKey(_) => "Unknown key.",
        }
    }
}

/// Overflow, infinity and NaN results.
#[derive(Debug, Error)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result overflowed")]
    Overflow,

    #[error("Result is not a number")]
    NotANumber,
}

impl ArithmeticError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ArithmeticError::DivisionByZero => "Cannot divide by zero.",
            ArithmeticError::Overflow => "The result is too large to display.",
            ArithmeticError::NotANumber => "The result is undefined.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to reach the forecast service. Check your internet connection."
            }
            NetworkError::Timeout => "The forecast request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The forecast service is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The forecast request failed.",
        }
    }
}

/// Malformed or unexpected data.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Empty payload")]
    EmptyPayload,

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl ParseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ParseError::MalformedJson(_) => "The forecast data could not be read (invalid JSON).",
            ParseError::EmptyPayload => "The forecast service returned no data.",
            ParseError::UnexpectedShape(_) => "The forecast data has an unexpected format.",
            ParseError::InvalidValue(_) => "The forecast data contains an invalid value.",
        }
    }
}

/// Missing local resources such as the area dataset.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed resource {path}: {message}")]
    Malformed { path: String, message: String },
}

impl ResourceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ResourceError::NotFound(_) => "The area list file was not found.",
            ResourceError::Malformed { .. } => "The area list file is not valid JSON.",
        }
    }
}

/// Database/storage errors (SQLite).
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

impl DatabaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DatabaseError::ConnectionFailed(_) => {
                "Unable to open the forecast history. Try restarting the app."
            }
            DatabaseError::QueryFailed(_) => "A history operation failed. Please try again.",
            DatabaseError::Corruption(_) => {
                "Forecast history may be corrupted. Consider deleting weather.db."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_database_error(self) -> DatabaseError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_database_error(self) -> DatabaseError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                DatabaseError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::CannotOpen =>
            {
                DatabaseError::ConnectionFailed(self.to_string())
            }
            _ => DatabaseError::QueryFailed(self.to_string()),
        }
    }
}
