use std::sync::Arc;

use anyhow::Result;
use hako_core::{AppError, Config};

use crate::services::{CalculatorService, ForecastService};

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    calculator: CalculatorService,
    forecasts: ForecastService,
}

impl App {
    /// Create a new application instance from the user's config file
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        if !validation.warnings.is_empty() {
            tracing::info!(
                "Config loaded with {} warnings",
                validation.warnings.len()
            );
        }
        Self::from_config(config).map_err(Into::into)
    }

    /// Create an application instance from an already-loaded config
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let calculator = CalculatorService::new(&config.calculator);
        let forecasts = ForecastService::from_config(&config.weather)?;

        Ok(Self {
            config: Arc::new(config),
            calculator,
            forecasts,
        })
    }

    /// Load the area list. A missing dataset is reported, not fatal: the
    /// calculator and forecast history stay usable.
    pub fn initialize(&mut self) -> Result<(), AppError> {
        tracing::info!("Initializing application");

        if let Err(e) = self.forecasts.load_areas() {
            tracing::warn!("Area list unavailable: {}", e);
            return Err(e);
        }

        tracing::info!("Application initialized successfully");
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        if self.forecasts.is_busy() {
            tracing::debug!("Abandoning in-flight forecast fetch");
        }
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn calculator(&mut self) -> &mut CalculatorService {
        &mut self.calculator
    }

    pub fn forecasts(&mut self) -> &mut ForecastService {
        &mut self.forecasts
    }
}
