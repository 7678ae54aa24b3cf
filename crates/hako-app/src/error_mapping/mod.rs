//! Maps crate errors to hako_core::AppError for consistent user-facing messages.
//! Each crate has its own module to keep mappings small and readable.

use hako_core::AppError;

mod calc;
mod weather;

/// Conversion into the application error hierarchy.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
