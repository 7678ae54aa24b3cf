//! Calculator error values.

use thiserror::Error;

/// Prefix shared by every error shown on the display.
pub const ERROR_LITERAL: &str = "Error";

/// Computation failure. `Display` is the exact text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Result overflowed or is NaN (includes `x ÷ 0`).
    #[error("Error")]
    NotFinite,

    #[error("Error: integers only")]
    IntegersOnly,

    #[error("Error: positive only")]
    PositiveOnly,

    #[error("Error: too large")]
    TooLarge,

    #[error("Error: negative square root")]
    NegativeSquareRoot,

    #[error("Error: division by zero")]
    DivisionByZero,

    #[error("Error: invalid number")]
    InvalidNumber,
}

impl CalcError {
    /// True for operand/domain problems, false for overflow-style results.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::NotFinite | Self::DivisionByZero)
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
