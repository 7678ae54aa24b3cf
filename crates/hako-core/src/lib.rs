pub mod config;
pub mod error;
pub mod fetch_state;

pub use config::{CalculatorConfig, Config, ValidationResult, WeatherConfig};
pub use error::{
    AppError, ArithmeticError, ConfigError, DatabaseError, InputError, NetworkError, ParseError,
    ResourceError,
};
pub use fetch_state::{FetchState, FetchTicket};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init() -> Result<()> {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Hako core initialized");
    }
    Ok(())
}
