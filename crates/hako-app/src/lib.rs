//! Application layer for Hako.
//!
//! Wires configuration into the calculator and forecast services and maps
//! crate errors into [`hako_core::AppError`].

pub mod app;
pub mod error_mapping;
pub mod services;

pub use app::App;
pub use error_mapping::IntoAppError;
pub use services::{CalculatorService, ForecastService};
