pub mod calculator_service;
pub mod weather_service;

pub use calculator_service::CalculatorService;
pub use weather_service::ForecastService;
